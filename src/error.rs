//! Error kinds surfaced by the interaction handlers.
//!
//! Every variant is recoverable: the CLI prints it and exits nonzero, the
//! GUI renders it on the status line. Nothing here aborts the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The upload could not be read as CSV or XLSX.
    #[error("unreadable or unsupported file: {0}")]
    Format(String),

    /// One or more required columns are missing from the upload.
    #[error("the uploaded file does not contain the required columns: {}. Please upload a valid file.", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A marketplace_id field that must be an integer was not one.
    #[error("marketplace_id {0:?} is not a valid integer")]
    Value(String),

    /// A link action was triggered with no rows selected.
    #[error("no rows are selected")]
    EmptySelection,
}

pub type Result<T> = std::result::Result<T, Error>;
