//! Audit Links Tool - Generate catalog deep links from listing records
//!
//! Command-line companion to the GUI: loads a CSV or XLSX file of product
//! listing records, filters rows by auditor (and optional keyword), and
//! prints or exports Browse Query Editor and orphan-tool links.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use listing_audit_toolkit::report;
use listing_audit_toolkit::session::AuditSession;
use listing_audit_toolkit::LinkEntry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audit-links")]
#[command(about = "Generate catalog deep links from product listing records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct auditors in a file with their row counts
    Auditors {
        /// Input CSV or XLSX file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Count the rows assigned to one auditor
    Count {
        /// Input CSV or XLSX file
        #[arg(short, long)]
        input: PathBuf,

        /// Auditor name (exact match against the Auditors column)
        #[arg(short, long)]
        auditor: String,
    },

    /// Print Browse Query Editor links for the selected rows
    Bqe {
        /// Input CSV or XLSX file
        #[arg(short, long)]
        input: PathBuf,

        /// Auditor name (exact match against the Auditors column)
        #[arg(short, long)]
        auditor: String,

        /// Keep only rows where some field contains this text
        /// (case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,

        /// Positions within the filtered view to select (0-indexed,
        /// comma-separated). Default: all visible rows.
        #[arg(long, value_delimiter = ',')]
        rows: Vec<usize>,
    },

    /// Print orphan-tool links for the selected rows
    Orphan {
        /// Input CSV or XLSX file
        #[arg(short, long)]
        input: PathBuf,

        /// Auditor name (exact match against the Auditors column)
        #[arg(short, long)]
        auditor: String,

        /// Keep only rows where some field contains this text
        /// (case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,

        /// Positions within the filtered view to select (0-indexed,
        /// comma-separated). Default: all visible rows.
        #[arg(long, value_delimiter = ',')]
        rows: Vec<usize>,
    },

    /// Write a link report for the selected rows (.csv or .xlsx)
    Export {
        /// Input CSV or XLSX file
        #[arg(short, long)]
        input: PathBuf,

        /// Auditor name (exact match against the Auditors column)
        #[arg(short, long)]
        auditor: String,

        /// Keep only rows where some field contains this text
        /// (case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,

        /// Positions within the filtered view to select (0-indexed,
        /// comma-separated). Default: all visible rows.
        #[arg(long, value_delimiter = ',')]
        rows: Vec<usize>,

        /// Output report path; the extension picks the format
        #[arg(short, long)]
        output: PathBuf,

        /// Which link family to include
        #[arg(long, default_value = "both")]
        kind: LinkKind,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LinkKind {
    Bqe,
    Orphan,
    Both,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Auditors { input } => list_auditors(&input),
        Commands::Count { input, auditor } => {
            let session = prepare_session(&input, &auditor, "", &[])?;
            println!(
                "Number of line items for {}: {}",
                auditor,
                session.auditor_row_count()
            );
            Ok(())
        }
        Commands::Bqe {
            input,
            auditor,
            filter,
            rows,
        } => {
            let session = prepare_session(&input, &auditor, &filter, &rows)?;
            print_entries(&session.browse_query_links()?);
            Ok(())
        }
        Commands::Orphan {
            input,
            auditor,
            filter,
            rows,
        } => {
            let session = prepare_session(&input, &auditor, &filter, &rows)?;
            print_entries(&session.orphan_tool_links()?);
            Ok(())
        }
        Commands::Export {
            input,
            auditor,
            filter,
            rows,
            output,
            kind,
        } => export_links(&input, &auditor, &filter, &rows, &output, kind),
    }
}

fn list_auditors(input: &PathBuf) -> Result<()> {
    let mut session = AuditSession::new();
    session.load_path(input)?;
    let auditors = session.auditors();
    if auditors.is_empty() {
        eprintln!("No auditors found in {}", input.display());
        return Ok(());
    }
    for auditor in auditors {
        session.set_auditor(auditor.clone());
        println!("{}\t{}", auditor, session.auditor_row_count());
    }
    Ok(())
}

/// Load the input, apply the auditor/filter, and select the requested
/// rows (all visible rows when none are given).
fn prepare_session(
    input: &PathBuf,
    auditor: &str,
    filter: &str,
    rows: &[usize],
) -> Result<AuditSession> {
    let mut session = AuditSession::new();
    session
        .load_path(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let auditors = session.auditors();
    if !auditors.iter().any(|a| a == auditor) {
        anyhow::bail!(
            "Auditor '{}' not found. Available: {}",
            auditor,
            auditors.join(", ")
        );
    }
    session.set_auditor(auditor.to_string());
    session.set_predicate(filter.to_string());

    log::debug!(
        "{} of {} rows visible for auditor '{}'",
        session.visible_len(),
        session.auditor_row_count(),
        auditor
    );

    if rows.is_empty() {
        for position in 0..session.visible_len() {
            session.toggle_row(position);
        }
    } else {
        for &position in rows {
            if position >= session.visible_len() {
                anyhow::bail!(
                    "Row {} is out of range ({} visible rows)",
                    position,
                    session.visible_len()
                );
            }
            session.toggle_row(position);
        }
    }

    Ok(session)
}

fn print_entries(entries: &[LinkEntry]) {
    for entry in entries {
        println!("{}\t{}", entry.label, entry.url);
    }
}

fn export_links(
    input: &PathBuf,
    auditor: &str,
    filter: &str,
    rows: &[usize],
    output: &PathBuf,
    kind: LinkKind,
) -> Result<()> {
    let session = prepare_session(input, auditor, filter, rows)?;

    let mut entries = Vec::new();
    if kind == LinkKind::Bqe || kind == LinkKind::Both {
        entries.extend(session.browse_query_links()?);
    }
    if kind == LinkKind::Orphan || kind == LinkKind::Both {
        entries.extend(session.orphan_tool_links()?);
    }

    report::write_links_report(output, &entries)?;
    eprintln!("Wrote {} links to {}", entries.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,marketplace_id,Auditors
A1,A2,A3,P100,44,Alice
B1,B2,B3,P200,44,Alice
C1,C2,C3,P300,7,Bob
";

    fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("records.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        path
    }

    #[test]
    fn prepare_session_selects_all_visible_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);
        let session = prepare_session(&path, "Alice", "", &[]).unwrap();
        assert_eq!(session.selection().len(), 2);
        let entries = session.browse_query_links().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn prepare_session_rejects_unknown_auditor() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);
        let err = prepare_session(&path, "Carol", "", &[]).unwrap_err();
        assert!(err.to_string().contains("Carol"));
        assert!(err.to_string().contains("Alice"));
    }

    #[test]
    fn prepare_session_rejects_out_of_range_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);
        let err = prepare_session(&path, "Bob", "", &[5]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn export_writes_both_link_families() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(&dir);
        let output = dir.path().join("links.csv");
        export_links(&input, "Bob", "", &[], &output, LinkKind::Both).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("browse-query-editor-na.aka.amazon.com"));
        assert!(content.contains("https://vermont.amazon.com/orphan-tool/7/P300"));
    }
}
