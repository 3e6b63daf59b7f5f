//! Extension platform services: context menus, tabs, printing, downloads
//! and confirmation prompts. The background handler and the management view
//! only talk to these traits; `native` implements them for a desktop host.

use std::path::PathBuf;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod native;

/// Where a context menu was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    Selection,
    Page,
    Link,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<ContextType>,
}

impl MenuItem {
    pub fn shown_in(&self, context: ContextType) -> bool {
        self.contexts.contains(&context)
    }
}

/// Payload of a context menu click.
#[derive(Debug, Clone)]
pub struct OnClickData {
    pub menu_item_id: String,
    pub context: ContextType,
    pub selection_text: Option<String>,
}

/// The tab a menu was invoked from.
#[derive(Debug, Clone)]
pub struct Tab {
    pub url: String,
    pub title: Option<String>,
}

#[async_trait]
pub trait ContextMenus: Send + Sync {
    async fn create(&self, item: MenuItem) -> Result<()>;
}

#[async_trait]
pub trait Tabs: Send + Sync {
    /// Open `url` in a new tab. Relative URLs name extension pages.
    /// Returns the URL that was opened.
    async fn create(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Completed,
    Cancelled,
}

#[async_trait]
pub trait Printer: Send + Sync {
    /// Run the print flow for a rendered document.
    async fn print(&self, document: &str) -> Result<PrintOutcome>;
}

/// Bytes plus MIME type, ready to be handed to a download.
#[derive(Debug, Clone)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>, mime: &str) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.to_string(),
        }
    }
}

/// Transient reference to a [`Blob`], valid until revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(pub String);

#[async_trait]
pub trait Downloads: Send + Sync {
    fn create_object_url(&self, blob: Blob) -> ObjectUrl;

    /// Save the blob behind `url` under `filename`; returns where it landed.
    async fn save(&self, url: &ObjectUrl, filename: &str) -> Result<PathBuf>;

    fn revoke_object_url(&self, url: &ObjectUrl);
}

pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}
