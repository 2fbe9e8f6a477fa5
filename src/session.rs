//! Audit session: the explicit state object behind each interaction.
//!
//! One session holds the uploaded dataset, the auditor selector, the
//! predicate text, the derived filtered view, and the selection set. Every
//! interaction (load, selector change, predicate change, toggle, link
//! generation) is a synchronous method that fully recomputes derived state
//! before returning.
//!
//! Selections are positions into the filtered view. Whenever the view's
//! composition changes the selection is cleared, so a stored position can
//! never silently re-point at a different underlying row.

use std::path::Path;

use crate::dataset::{Dataset, FileFormat};
use crate::error::{Error, Result};
use crate::filter;
use crate::links;
use crate::selection::SelectionSet;

/// A generated deep link ready for display: a human-readable label plus
/// the URL itself. Never stored by the session; callers own the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct AuditSession {
    dataset: Option<Dataset>,
    auditor: Option<String>,
    predicate: String,
    visible: Vec<usize>,
    selection: SelectionSet,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dataset from a file, replacing any previous upload.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = Dataset::load(path)?;
        self.install(dataset);
        Ok(())
    }

    /// Load a dataset from raw bytes, replacing any previous upload.
    pub fn load_bytes(&mut self, bytes: &[u8], format: FileFormat) -> Result<()> {
        let dataset = Dataset::from_bytes(bytes, format)?;
        self.install(dataset);
        Ok(())
    }

    fn install(&mut self, dataset: Dataset) {
        self.auditor = dataset.distinct_auditors().into_iter().next();
        self.dataset = Some(dataset);
        self.selection.clear();
        self.refresh_view();
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Distinct auditors of the loaded dataset, in first-appearance order.
    pub fn auditors(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|d| d.distinct_auditors())
            .unwrap_or_default()
    }

    pub fn auditor(&self) -> Option<&str> {
        self.auditor.as_deref()
    }

    pub fn set_auditor(&mut self, auditor: String) {
        self.auditor = Some(auditor);
        self.refresh_view();
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn set_predicate(&mut self, text: String) {
        self.predicate = text;
        self.refresh_view();
    }

    /// Recompute the filtered view; clear the selection iff the view's
    /// composition changed.
    fn refresh_view(&mut self) {
        let new_view = match (&self.dataset, &self.auditor) {
            (Some(dataset), Some(auditor)) => {
                filter::visible_rows(dataset, auditor, &self.predicate)
            }
            _ => Vec::new(),
        };
        if new_view != self.visible {
            self.visible = new_view;
            self.selection.clear();
        }
    }

    /// Partition-only row count for the current auditor (summary line).
    pub fn auditor_row_count(&self) -> usize {
        match (&self.dataset, &self.auditor) {
            (Some(dataset), Some(auditor)) => filter::count(dataset, auditor),
            _ => 0,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The fields of the row at a filtered-view position.
    pub fn visible_row(&self, position: usize) -> Option<&[String]> {
        let idx = *self.visible.get(position)?;
        self.dataset.as_ref()?.row(idx)
    }

    /// One field of the row at a filtered-view position, by column name.
    pub fn visible_field(&self, position: usize, column: &str) -> Option<&str> {
        let idx = *self.visible.get(position)?;
        self.dataset.as_ref()?.field(idx, column)
    }

    /// Toggle a filtered-view position in or out of the selection.
    /// Out-of-range positions are ignored.
    pub fn toggle_row(&mut self, position: usize) -> bool {
        if position >= self.visible.len() {
            return false;
        }
        self.selection.toggle(position)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// One Browse Query Editor link per selected row, built from its three
    /// example ASINs and its marketplace_id.
    pub fn browse_query_links(&self) -> Result<Vec<LinkEntry>> {
        self.selected_links(|session, position| {
            let asins: Vec<String> = ["example_asin_1", "example_asin_2", "example_asin_3"]
                .iter()
                .filter_map(|col| session.visible_field(position, col))
                .map(|v| v.to_string())
                .collect();
            let marketplace_id = session.marketplace_id_at(position)?;
            Ok(LinkEntry {
                label: format!("BQE for ASINs: {}", asins.join("+")),
                url: links::build_browse_query_link(marketplace_id, &asins),
            })
        })
    }

    /// One orphan-tool link per selected row, built from its
    /// parent_item_id and marketplace_id.
    pub fn orphan_tool_links(&self) -> Result<Vec<LinkEntry>> {
        self.selected_links(|session, position| {
            let parent_item_id = session
                .visible_field(position, "parent_item_id")
                .unwrap_or("")
                .to_string();
            let marketplace_id = session.marketplace_id_at(position)?;
            Ok(LinkEntry {
                label: format!("Orphan tool for parent: {}", parent_item_id),
                url: links::build_orphan_tool_link(marketplace_id, &parent_item_id),
            })
        })
    }

    fn marketplace_id_at(&self, position: usize) -> Result<i64> {
        let raw = self
            .visible_field(position, "marketplace_id")
            .unwrap_or("");
        links::parse_marketplace_id(raw)
    }

    fn selected_links(
        &self,
        build: impl Fn(&Self, usize) -> Result<LinkEntry>,
    ) -> Result<Vec<LinkEntry>> {
        if self.selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.selection
            .members()
            .map(|position| build(self, position))
            .collect()
    }
}
