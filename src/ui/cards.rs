use crate::models::{Collection, Note};

use super::escape_html;
use super::handler::Rect;
use super::page::Presentation;

const EMPTY_STATE: &str = r##"<div class="empty-state" style="text-align:center; padding: 60px 0; color:#86868B;">
  <svg width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="#D1D1D6" stroke-width="1">
    <path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"></path>
    <polyline points="14 2 14 8 20 8"></polyline>
    <line x1="16" y1="13" x2="8" y2="13"></line>
    <line x1="16" y1="17" x2="8" y2="17"></line>
    <polyline points="10 9 9 9 8 9"></polyline>
  </svg>
  <p>- 浮生暂寄梦中梦 -</p>
</div>"##;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Viewing,
    Editing,
}

/// One rendered note. `note.content` mirrors what the editable region shows,
/// which may run ahead of storage while the card is being edited.
#[derive(Debug, Clone)]
pub struct Card {
    pub note: Note,
    pub state: CardState,
    glow: Option<(f64, f64)>,
}

impl Card {
    fn new(note: Note) -> Self {
        Self {
            note,
            state: CardState::Viewing,
            glow: None,
        }
    }

    /// Centre the glow on the pointer, as percentages of the card box.
    pub fn track_pointer(&mut self, client_x: f64, client_y: f64, rect: Rect) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let x = (client_x - rect.left) / rect.width * 100.0;
        let y = (client_y - rect.top) / rect.height * 100.0;
        self.glow = Some((x, y));
    }

    pub fn reset_pointer(&mut self) {
        self.glow = Some((50.0, 50.0));
    }

    fn render(&self, presentation: &Presentation) -> String {
        let note = &self.note;
        let class = match self.state {
            CardState::Viewing => "note-card",
            CardState::Editing => "note-card editing",
        };
        let style = self
            .glow
            .map(|(x, y)| format!(r#" style="--mouse-x: {}%; --mouse-y: {}%""#, pct(x), pct(y)))
            .unwrap_or_default();

        format!(
            r#"<div class="{class}"{style}>
  <div class="delete-btn" data-id="{id}" title="删除">×</div>
  <div class="note-content" contenteditable="true" data-id="{id}" title="点击即可编辑内容">{content}</div>
  {meta}
</div>"#,
            id = note.id,
            content = escape_html(&note.content),
            meta = render_meta(note, presentation),
        )
    }
}

fn pct(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn hidden(yes: bool) -> &'static str {
    if yes {
        r#" style="display:none""#
    } else {
        ""
    }
}

fn render_meta(note: &Note, presentation: &Presentation) -> String {
    let url = escape_html(&note.source_url);
    let title = escape_html(note.display_title());
    let print_only_hidden = presentation.source_hidden || !presentation.printing;

    format!(
        r#"<div class="note-meta">
    <span class="meta-time"{time_style}>{timestamp}</span>
    <span class="meta-source screen-only"{source_style}>来自: <a href="{url}" target="_blank">{title}</a></span>
    <span class="meta-source print-only"{print_style}>来自: <a href="{url}">{title}</a></span>
  </div>"#,
        time_style = hidden(presentation.time_hidden),
        timestamp = escape_html(&note.timestamp),
        source_style = hidden(presentation.source_hidden),
        print_style = hidden(print_only_hidden),
    )
}

/// Contents of the `#note-list` region. Always rebuilt as a whole.
#[derive(Debug, Clone, Default)]
pub enum ListRegion {
    #[default]
    Empty,
    Cards(Vec<Card>),
}

impl ListRegion {
    pub fn from_notes(notes: Collection) -> Self {
        if notes.is_empty() {
            Self::Empty
        } else {
            Self::Cards(notes.into_iter().map(Card::new).collect())
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn card_mut(&mut self, id: i64) -> Option<&mut Card> {
        match self {
            Self::Empty => None,
            Self::Cards(cards) => cards.iter_mut().find(|c| c.note.id == id),
        }
    }

    pub fn render(&self, presentation: &Presentation) -> String {
        match self {
            Self::Empty => EMPTY_STATE.to_string(),
            Self::Cards(cards) => cards
                .iter()
                .map(|card| card.render(presentation))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
