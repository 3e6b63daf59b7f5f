use crate::models::ExportFormat;

/// Border box of an element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The parts of an event target the management page reacts to.
#[derive(Debug, Clone, Default)]
pub struct DomTarget {
    pub element_id: Option<String>,
    pub classes: Vec<String>,
    pub data_id: Option<String>,
    pub data_format: Option<String>,
    /// Target sits inside `.export-menu-wrapper`.
    pub in_export_wrapper: bool,
    pub inner_text: String,
    pub checked: bool,
}

impl DomTarget {
    pub fn by_id(id: &str) -> Self {
        Self {
            element_id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn delete_button(note_id: i64) -> Self {
        Self {
            classes: vec!["delete-btn".to_string()],
            data_id: Some(note_id.to_string()),
            ..Self::default()
        }
    }

    pub fn note_content(note_id: i64, inner_text: &str) -> Self {
        Self {
            classes: vec!["note-content".to_string()],
            data_id: Some(note_id.to_string()),
            inner_text: inner_text.to_string(),
            ..Self::default()
        }
    }

    pub fn export_button() -> Self {
        Self {
            in_export_wrapper: true,
            ..Self::by_id("export-btn")
        }
    }

    pub fn export_option(format: ExportFormat) -> Self {
        Self {
            classes: vec!["export-option".to_string()],
            data_format: Some(format.data_attr().to_string()),
            in_export_wrapper: true,
            ..Self::default()
        }
    }

    pub fn checkbox(id: &str, checked: bool) -> Self {
        Self {
            in_export_wrapper: true,
            checked,
            ..Self::by_id(id)
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is(&self, id: &str) -> bool {
        self.element_id.as_deref() == Some(id)
    }

    fn note_id(&self) -> Option<i64> {
        self.data_id.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

#[derive(Debug, Clone)]
pub enum DomEvent {
    Click(DomTarget),
    Focus(DomTarget),
    Blur(DomTarget),
    Change(DomTarget),
    MouseMove {
        note_id: i64,
        client_x: f64,
        client_y: f64,
        rect: Rect,
    },
    MouseLeave {
        note_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Load,
    FocusNote(i64),
    CommitEdit { id: i64, content: String },
    DeleteNote(i64),
    ClearAll,
    ToggleExportMenu,
    CloseExportMenu,
    SetIncludeTime(bool),
    SetIncludeSource(bool),
    Export(ExportFormat),
    TrackPointer {
        id: i64,
        client_x: f64,
        client_y: f64,
        rect: Rect,
    },
    ResetPointer(i64),
}

/// Map a page event to the actions its listeners would run, in listener
/// order. Clicks bubble to the document-level "close the export menu when
/// clicking outside it" listener unless a handler stops propagation.
pub fn handle_dom_event(event: DomEvent) -> Vec<AppAction> {
    match event {
        DomEvent::Click(target) => {
            if target.has_class("delete-btn") {
                // The delete handler stops propagation.
                return target.note_id().map(AppAction::DeleteNote).into_iter().collect();
            }

            let mut actions = Vec::new();
            if target.is("clear-all") {
                actions.push(AppAction::ClearAll);
            } else if target.is("export-btn") {
                actions.push(AppAction::ToggleExportMenu);
            } else if target.has_class("export-option") {
                if let Some(format) = target.data_format.as_deref().and_then(ExportFormat::from_data_attr) {
                    actions.push(AppAction::Export(format));
                }
            }
            if !target.in_export_wrapper {
                actions.push(AppAction::CloseExportMenu);
            }
            actions
        }

        DomEvent::Focus(target) if target.has_class("note-content") => {
            target.note_id().map(AppAction::FocusNote).into_iter().collect()
        }

        DomEvent::Blur(target) if target.has_class("note-content") => target
            .note_id()
            .map(|id| AppAction::CommitEdit {
                id,
                content: target.inner_text.clone(),
            })
            .into_iter()
            .collect(),

        DomEvent::Change(target) if target.is("export-include-time") => {
            vec![AppAction::SetIncludeTime(target.checked)]
        }
        DomEvent::Change(target) if target.is("export-include-source") => {
            vec![AppAction::SetIncludeSource(target.checked)]
        }

        DomEvent::MouseMove {
            note_id,
            client_x,
            client_y,
            rect,
        } => vec![AppAction::TrackPointer {
            id: note_id,
            client_x,
            client_y,
            rect,
        }],
        DomEvent::MouseLeave { note_id } => vec![AppAction::ResetPointer(note_id)],

        _ => Vec::new(),
    }
}
