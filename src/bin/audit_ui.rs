//! Listing Audit Toolkit - Graphical User Interface
//!
//! Single-page interactive tool: load a spreadsheet of product listing
//! records, pick an auditor, filter and select rows, and generate Browse
//! Query Editor and orphan-tool deep links for the selection.

use iced::widget::{
    button, checkbox, column, container, pick_list, row, rule, scrollable, text, text_input,
};
use iced::{Center, Element, Fill, Task, Theme};
use listing_audit_toolkit::report;
use listing_audit_toolkit::session::{AuditSession, LinkEntry};
use std::path::PathBuf;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::new, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run()
}

// ============================================================================
// App State
// ============================================================================

struct App {
    session: AuditSession,

    // Upload
    file_path: String,
    loaded_file: String,

    // Cached for the pick_list widget
    auditors: Vec<String>,

    // Generated links (display-only)
    links: Vec<LinkEntry>,

    status_text: String,
}

impl App {
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn new() -> (Self, Task<Message>) {
        (
            App {
                session: AuditSession::new(),
                file_path: String::new(),
                loaded_file: String::new(),
                auditors: Vec::new(),
                links: Vec::new(),
                status_text: String::new(),
            },
            Task::none(),
        )
    }

    /// Load the file at `self.file_path`, replacing any previous dataset.
    /// Errors are recovered onto the status line.
    fn load_current_file(&mut self) {
        let path = PathBuf::from(&self.file_path);
        match self.session.load_path(&path) {
            Ok(()) => {
                self.auditors = self.session.auditors();
                self.links.clear();
                self.loaded_file = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("(unknown)")
                    .to_string();
                let rows = self.session.dataset().map(|d| d.len()).unwrap_or(0);
                self.status_text =
                    format!("File '{}' uploaded successfully ({} rows).", self.loaded_file, rows);
            }
            Err(e) => {
                self.status_text = format!("Error: {}", e);
            }
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    // Upload
    BrowseFile,
    FileSelected(Option<PathBuf>),
    FilePathChanged(String),
    LoadFile,

    // Filtering and selection
    AuditorSelected(String),
    FilterChanged(String),
    RowToggled(usize, bool),
    ClearSelection,

    // Link generation
    GenerateBqeLinks,
    GenerateOrphanLinks,

    // Link export
    BrowseSaveTarget,
    SaveTargetSelected(Option<PathBuf>),
}

// ============================================================================
// Update
// ============================================================================

impl App {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // -- Upload --
            Message::BrowseFile => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("Spreadsheet files", &["csv", "xlsx"])
                        .set_title("Select a listing records file")
                        .pick_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::FileSelected,
            ),
            Message::FileSelected(path) => {
                if let Some(p) = path {
                    self.file_path = p.display().to_string();
                    self.load_current_file();
                }
                Task::none()
            }
            Message::FilePathChanged(v) => {
                self.file_path = v;
                Task::none()
            }
            Message::LoadFile => {
                self.load_current_file();
                Task::none()
            }

            // -- Filtering and selection --
            Message::AuditorSelected(auditor) => {
                self.session.set_auditor(auditor);
                self.links.clear();
                Task::none()
            }
            Message::FilterChanged(text) => {
                self.session.set_predicate(text);
                self.links.clear();
                Task::none()
            }
            Message::RowToggled(position, _checked) => {
                self.session.toggle_row(position);
                Task::none()
            }
            Message::ClearSelection => {
                self.session.clear_selection();
                self.links.clear();
                Task::none()
            }

            // -- Link generation --
            Message::GenerateBqeLinks => {
                match self.session.browse_query_links() {
                    Ok(entries) => {
                        self.status_text = format!("Generated {} BQE links.", entries.len());
                        self.links = entries;
                    }
                    Err(e) => {
                        self.status_text = format!("Error: {}", e);
                        self.links.clear();
                    }
                }
                Task::none()
            }
            Message::GenerateOrphanLinks => {
                match self.session.orphan_tool_links() {
                    Ok(entries) => {
                        self.status_text =
                            format!("Generated {} orphan-tool links.", entries.len());
                        self.links = entries;
                    }
                    Err(e) => {
                        self.status_text = format!("Error: {}", e);
                        self.links.clear();
                    }
                }
                Task::none()
            }

            // -- Link export --
            Message::BrowseSaveTarget => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .add_filter("Excel files", &["xlsx"])
                        .set_file_name("links.csv")
                        .save_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::SaveTargetSelected,
            ),
            Message::SaveTargetSelected(path) => {
                if let Some(p) = path {
                    match report::write_links_report(&p, &self.links) {
                        Ok(()) => {
                            self.status_text =
                                format!("Saved {} links to {}", self.links.len(), p.display());
                        }
                        Err(e) => {
                            self.status_text = format!("Error: {}", e);
                        }
                    }
                }
                Task::none()
            }
        }
    }
}

// ============================================================================
// View
// ============================================================================

impl App {
    fn view(&self) -> Element<'_, Message> {
        let title = text("Listing Audit Toolkit").size(28);
        let subtitle = text("Upload a CSV or Excel file of listing records").size(14);

        let upload_section = row![
            text_input("Select a records file...", &self.file_path)
                .on_input(Message::FilePathChanged)
                .on_submit(Message::LoadFile)
                .width(Fill),
            button(text("Browse").size(13)).on_press(Message::BrowseFile),
            button(text("Load").size(13)).on_press_maybe(if self.file_path.is_empty() {
                None
            } else {
                Some(Message::LoadFile)
            }),
        ]
        .spacing(10)
        .align_y(Center);

        let body: Element<'_, Message> = if self.session.dataset().is_some() {
            self.view_loaded()
        } else {
            column![text("No file loaded yet.").size(13)].into()
        };

        let status: Element<'_, Message> = if self.status_text.is_empty() {
            column![].into()
        } else {
            text(&self.status_text).size(13).into()
        };

        let content = column![title, subtitle, upload_section, rule::horizontal(1), body, status]
            .spacing(14);

        container(scrollable(content))
            .padding(20)
            .width(Fill)
            .height(Fill)
            .into()
    }

    /// Everything below the upload row once a dataset is in memory.
    fn view_loaded(&self) -> Element<'_, Message> {
        let selected_auditor = self.session.auditor().map(|a| a.to_string());

        let auditor_section = row![
            text("Auditor:").size(14).width(80),
            pick_list(
                self.auditors.clone(),
                selected_auditor.clone(),
                Message::AuditorSelected
            ),
            text(format!(
                "Number of line items for {}: {}",
                selected_auditor.as_deref().unwrap_or("(none)"),
                self.session.auditor_row_count()
            ))
            .size(13),
        ]
        .spacing(10)
        .align_y(Center);

        let filter_section = row![
            text("Filter:").size(14).width(80),
            text_input("Filter rows by keyword...", self.session.predicate())
                .on_input(Message::FilterChanged)
                .width(300),
        ]
        .spacing(10)
        .align_y(Center);

        column![
            auditor_section,
            filter_section,
            self.view_row_table(),
            self.view_selection_summary(),
            self.view_actions(),
            self.view_links(),
        ]
        .spacing(14)
        .into()
    }

    /// The filtered rows, one checkbox per row.
    fn view_row_table(&self) -> Element<'_, Message> {
        let headers = self
            .session
            .dataset()
            .map(|d| d.headers().join("  |  "))
            .unwrap_or_default();

        let mut rows: Vec<Element<'_, Message>> = Vec::new();
        rows.push(text(headers).size(12).into());
        rows.push(rule::horizontal(1).into());

        for position in 0..self.session.visible_len() {
            let fields = self
                .session
                .visible_row(position)
                .map(|r| r.join("  |  "))
                .unwrap_or_default();
            let selected = self.session.selection().contains(position);
            rows.push(
                checkbox(selected)
                    .label(fields)
                    .on_toggle(move |v| Message::RowToggled(position, v))
                    .size(14)
                    .into(),
            );
        }

        if self.session.visible_len() == 0 {
            rows.push(
                text("-- no rows match the current filter --")
                    .size(13)
                    .color(iced::Color::from_rgb(0.6, 0.6, 0.6))
                    .into(),
            );
        }

        scrollable(column(rows).spacing(4))
            .height(260)
            .width(Fill)
            .into()
    }

    /// Summary of the selected rows: count plus their example ASINs.
    fn view_selection_summary(&self) -> Element<'_, Message> {
        let selection = self.session.selection();
        if selection.is_empty() {
            return column![].into();
        }

        let mut lines: Vec<Element<'_, Message>> = Vec::new();
        lines.push(
            text(format!("Total Selected Rows: {}", selection.len()))
                .size(13)
                .into(),
        );
        for position in selection.members() {
            let asins: Vec<&str> = ["example_asin_1", "example_asin_2", "example_asin_3"]
                .iter()
                .filter_map(|col| self.session.visible_field(position, col))
                .collect();
            lines.push(
                text(format!("  Row {}: {}", position, asins.join(", ")))
                    .size(12)
                    .into(),
            );
        }
        column(lines).spacing(2).into()
    }

    fn view_actions(&self) -> Element<'_, Message> {
        let has_selection = !self.session.selection().is_empty();

        row![
            button(text("Generate BQE Links").size(13)).on_press(Message::GenerateBqeLinks),
            button(text("Generate Orphan Tool Links").size(13))
                .on_press(Message::GenerateOrphanLinks),
            button(text("Clear Selection").size(13)).on_press_maybe(if has_selection {
                Some(Message::ClearSelection)
            } else {
                None
            }),
        ]
        .spacing(10)
        .align_y(Center)
        .into()
    }

    /// Generated links, display-only, with a save button.
    fn view_links(&self) -> Element<'_, Message> {
        if self.links.is_empty() {
            return column![].into();
        }

        let mut lines: Vec<Element<'_, Message>> = Vec::new();
        lines.push(text("Generated Links:").size(14).into());
        for entry in &self.links {
            lines.push(text(&entry.label).size(13).into());
            lines.push(
                text(&entry.url)
                    .size(12)
                    .color(iced::Color::from_rgb(0.4, 0.7, 1.0))
                    .into(),
            );
        }
        lines.push(
            row![button(text("Save Links...").size(13)).on_press(Message::BrowseSaveTarget)]
                .into(),
        );

        column(lines).spacing(4).into()
    }
}
