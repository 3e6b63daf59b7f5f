use std::path::PathBuf;
use std::sync::Arc;

use crate::db::Repository;
use crate::error::Result;
use crate::export::{self, download_file, print_view};
use crate::models::{ExportFormat, ExportOptions};
use crate::platform::{Blob, Confirm, Downloads, PrintOutcome, Printer};
use crate::ui::{self, handle_dom_event, AppAction, CardState, DomEvent, ListRegion, Presentation};

const CONFIRM_DELETE: &str = "确定删除这条笔记吗？";
const CONFIRM_CLEAR: &str = "确定清空所有笔记吗？此操作不可恢复！";

/// What an action amounted to, for the host to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A confirmation prompt was declined.
    Declined,
    Edited { written: bool },
    Downloaded(PathBuf),
    Printed(PrintOutcome),
}

/// State of one open management view.
pub struct App {
    // View
    pub list: ListRegion,
    pub presentation: Presentation,
    pub export_menu_open: bool,
    pub options: ExportOptions,

    // Services
    repository: Repository,
    downloads: Arc<dyn Downloads>,
    printer: Arc<dyn Printer>,
    confirm: Arc<dyn Confirm>,
}

impl App {
    pub fn new(
        repository: Repository,
        downloads: Arc<dyn Downloads>,
        printer: Arc<dyn Printer>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            list: ListRegion::Empty,
            presentation: Presentation::default(),
            export_menu_open: false,
            options: ExportOptions::default(),
            repository,
            downloads,
            printer,
            confirm,
        }
    }

    pub fn page_html(&self) -> String {
        ui::render_page(&self.list, &self.presentation, self.export_menu_open, self.options)
    }

    /// Run every action a page event triggers. Returns the last outcome that
    /// is more than [`Outcome::Done`].
    pub async fn dispatch(&mut self, event: DomEvent) -> Result<Outcome> {
        let mut result = Outcome::Done;
        for action in handle_dom_event(event) {
            let outcome = self.handle_action(action).await?;
            if outcome != Outcome::Done {
                result = outcome;
            }
        }
        Ok(result)
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<Outcome> {
        match action {
            AppAction::Load => {
                self.reload().await;
            }

            AppAction::FocusNote(id) => {
                if let Some(card) = self.list.card_mut(id) {
                    card.state = CardState::Editing;
                }
            }

            AppAction::CommitEdit { id, content } => {
                if let Some(card) = self.list.card_mut(id) {
                    card.state = CardState::Viewing;
                    card.note.content = content.clone();
                }
                let written = match self.repository.update(id, &content).await {
                    Ok(written) => written,
                    Err(e) => {
                        tracing::warn!("Failed to save note {}: {}", id, e);
                        false
                    }
                };
                return Ok(Outcome::Edited { written });
            }

            AppAction::DeleteNote(id) => {
                if !self.confirm.confirm(CONFIRM_DELETE) {
                    return Ok(Outcome::Declined);
                }
                if let Err(e) = self.repository.delete(id).await {
                    tracing::warn!("Failed to delete note {}: {}", id, e);
                }
                self.reload().await;
            }

            AppAction::ClearAll => {
                if !self.confirm.confirm(CONFIRM_CLEAR) {
                    return Ok(Outcome::Declined);
                }
                if let Err(e) = self.repository.clear().await {
                    tracing::warn!("Failed to clear notes: {}", e);
                }
                self.reload().await;
            }

            AppAction::ToggleExportMenu => {
                self.export_menu_open = !self.export_menu_open;
            }

            AppAction::CloseExportMenu => {
                self.export_menu_open = false;
            }

            AppAction::SetIncludeTime(on) => {
                self.options.include_time = on;
            }

            AppAction::SetIncludeSource(on) => {
                self.options.include_source = on;
            }

            AppAction::Export(format) => {
                self.export_menu_open = false;
                return self.export(format).await;
            }

            AppAction::TrackPointer {
                id,
                client_x,
                client_y,
                rect,
            } => {
                if let Some(card) = self.list.card_mut(id) {
                    card.track_pointer(client_x, client_y, rect);
                }
            }

            AppAction::ResetPointer(id) => {
                if let Some(card) = self.list.card_mut(id) {
                    card.reset_pointer();
                }
            }
        }

        Ok(Outcome::Done)
    }

    /// Replace the whole list region with what storage holds now. A failed
    /// read leaves the current list on screen.
    async fn reload(&mut self) {
        match self.repository.list().await {
            Ok(notes) => self.list = ListRegion::from_notes(notes),
            Err(e) => tracing::warn!("Failed to load notes: {}", e),
        }
    }

    async fn export(&mut self, format: ExportFormat) -> Result<Outcome> {
        let options = self.options;

        if format == ExportFormat::Pdf {
            let list = &self.list;
            let menu_open = self.export_menu_open;
            let outcome = print_view(
                &mut self.presentation,
                options,
                |presentation| ui::render_page(list, presentation, menu_open, options),
                self.printer.as_ref(),
            )
            .await?;
            return Ok(Outcome::Printed(outcome));
        }

        let notes = match self.repository.list().await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::warn!("Failed to read notes for export: {}", e);
                return Ok(Outcome::Done);
            }
        };

        let (blob, filename) = match format {
            ExportFormat::Txt => (
                Blob::new(export::to_text(&notes, options), export::TEXT_MIME),
                export::TEXT_FILENAME,
            ),
            _ => (
                Blob::new(export::to_word_html(&notes, options), export::WORD_MIME),
                export::WORD_FILENAME,
            ),
        };

        let path = download_file(self.downloads.as_ref(), blob, filename).await?;
        Ok(Outcome::Downloaded(path))
    }
}
