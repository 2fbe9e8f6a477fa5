//! Link report export: persist a generated link list as a CSV or XLSX
//! file. This writes tool *output*; session state is never persisted.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatUnderline, Url, Workbook};

use crate::session::LinkEntry;

/// Write a two-column (label, URL) CSV report.
pub fn write_links_csv(path: &Path, entries: &[LinkEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("Failed to create output CSV")?;
    writer.write_record(["Label", "URL"])?;
    for entry in entries {
        writer.write_record([entry.label.as_str(), entry.url.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a Links worksheet with the URLs as live hyperlinks.
pub fn write_links_workbook(path: &Path, entries: &[LinkEntry]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();
    let link_fmt = Format::new()
        .set_font_color("#0563C1")
        .set_underline(FormatUnderline::Single);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Links")?;
    sheet.write_string_with_format(0, 0, "Label", &header_fmt)?;
    sheet.write_string_with_format(0, 1, "URL", &header_fmt)?;

    for (i, entry) in entries.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &entry.label)?;
        sheet.write_url_with_format(row, 1, Url::new(&entry.url), &link_fmt)?;
    }

    sheet.set_column_width(0, 40)?;
    sheet.set_column_width(1, 120)?;

    workbook.save(path).context("Failed to save workbook")?;
    Ok(())
}

/// Write a report picking the format by the output extension
/// (.csv or .xlsx).
pub fn write_links_report(path: &Path, entries: &[LinkEntry]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_links_csv(path, entries),
        "xlsx" => write_links_workbook(path, entries),
        other => anyhow::bail!(
            "unsupported report extension '{}' (expected .csv or .xlsx)",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LinkEntry;

    fn entries() -> Vec<LinkEntry> {
        vec![
            LinkEntry {
                label: "BQE for ASINs: A1+A2+A3".to_string(),
                url: "https://browse-query-editor-na.aka.amazon.com/?userQuery=A1+A2+A3"
                    .to_string(),
            },
            LinkEntry {
                label: "Orphan tool for parent: P100".to_string(),
                url: "https://vermont.amazon.com/orphan-tool/44/P100".to_string(),
            },
        ]
    }

    #[test]
    fn csv_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        write_links_report(&path, &entries()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["Label", "URL"]
        );
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][1], "https://vermont.amazon.com/orphan-tool/44/P100");
    }

    #[test]
    fn workbook_report_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.xlsx");
        write_links_report(&path, &entries()).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn unknown_report_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.pdf");
        assert!(write_links_report(&path, &entries()).is_err());
    }
}
