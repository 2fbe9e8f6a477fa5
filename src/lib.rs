//! Listing Audit Toolkit
//!
//! Tools for auditing product listing records: load a spreadsheet of
//! records, filter and select rows, and build deep links into the Browse
//! Query Editor and the orphan tool for the selected records.
//!
//! This library provides:
//! - `dataset`: the in-memory record store with CSV/XLSX loading
//! - `filter`: the visible-row derivation and auditor summary count
//! - `selection`: the position-based selection set
//! - `links`: the two pure URL builders
//! - `session`: the explicit per-session state object
//! - `report`: CSV/XLSX export of generated link lists
//!
//! Binaries:
//! - `audit-links`: command-line link generation and reporting
//! - `audit-ui`: interactive single-page GUI

pub mod dataset;
pub mod error;
pub mod filter;
pub mod links;
pub mod report;
pub mod selection;
pub mod session;

// Re-export the types every caller touches
pub use dataset::{Dataset, FileFormat, AUDITORS_COLUMN, REQUIRED_COLUMNS};
pub use error::Error;
pub use selection::SelectionSet;
pub use session::{AuditSession, LinkEntry};
