use std::sync::Arc;

use chrono::{DateTime, Local};
use url::Url;

use crate::db::Repository;
use crate::error::Result;
use crate::models::Note;
use crate::platform::{ContextMenus, ContextType, MenuItem, OnClickData, Tab, Tabs};

pub const SAVE_MENU_ID: &str = "save-to-note";
pub const SAVE_MENU_TITLE: &str = "Save to Note";
pub const MANAGER_PAGE: &str = "manager.html";

#[derive(Debug, Clone)]
pub enum BrowserEvent {
    Installed,
    ContextMenuClicked { info: OnClickData, tab: Option<Tab> },
    ActionClicked,
}

/// Long-lived side of the extension: menu registration, capture, and the
/// toolbar button.
pub struct Background {
    menus: Arc<dyn ContextMenus>,
    tabs: Arc<dyn Tabs>,
    repository: Repository,
}

impl Background {
    pub fn new(menus: Arc<dyn ContextMenus>, tabs: Arc<dyn Tabs>, repository: Repository) -> Self {
        Self {
            menus,
            tabs,
            repository,
        }
    }

    pub fn save_menu_item() -> MenuItem {
        MenuItem {
            id: SAVE_MENU_ID.to_string(),
            title: SAVE_MENU_TITLE.to_string(),
            contexts: vec![ContextType::Selection],
        }
    }

    pub async fn dispatch(&self, event: BrowserEvent) -> Result<()> {
        match event {
            BrowserEvent::Installed => self.menus.create(Self::save_menu_item()).await,
            BrowserEvent::ContextMenuClicked { info, tab } => {
                self.on_menu_clicked(info, tab, Local::now()).await;
                Ok(())
            }
            BrowserEvent::ActionClicked => {
                let url = self.tabs.create(MANAGER_PAGE).await?;
                tracing::debug!("opened {}", url);
                Ok(())
            }
        }
    }

    /// Turn a "Save to Note" click into a stored note. Fire-and-forget:
    /// failures are logged and otherwise dropped.
    pub async fn on_menu_clicked(
        &self,
        info: OnClickData,
        tab: Option<Tab>,
        now: DateTime<Local>,
    ) -> Option<Note> {
        if info.menu_item_id != SAVE_MENU_ID {
            return None;
        }
        tracing::debug!("save menu clicked in {:?} context", info.context);
        let Some(selection) = info.selection_text else {
            tracing::debug!("menu clicked without a selection");
            return None;
        };

        let (url, title) = match tab {
            Some(tab) => (tab.url, tab.title),
            None => (String::new(), None),
        };
        if Url::parse(&url).is_err() {
            tracing::debug!("capturing from a page without a parseable url: {:?}", url);
        }

        let note = Note::new(now.timestamp_millis(), selection, url, title, now);
        match self.repository.create(note).await {
            Ok(saved) => {
                tracing::info!("笔记已保存 (id {})", saved.id);
                Some(saved)
            }
            Err(e) => {
                tracing::warn!("Failed to save note: {}", e);
                None
            }
        }
    }
}
