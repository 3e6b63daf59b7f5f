use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dialoguer::Confirm as ConfirmPrompt;
use url::Url;

use crate::error::{AppError, Result};

use super::{Blob, Confirm, ContextMenus, ContextType, Downloads, MenuItem, ObjectUrl, PrintOutcome, Printer, Tabs};

/// Context menu registry persisted as a JSON list next to the storage file.
pub struct MenuRegistry {
    path: PathBuf,
}

impl MenuRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn items(&self) -> Result<Vec<MenuItem>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a menu with this id would be offered in `context`.
    pub async fn is_shown(&self, id: &str, context: ContextType) -> Result<bool> {
        Ok(self
            .items()
            .await?
            .iter()
            .any(|item| item.id == id && item.shown_in(context)))
    }
}

#[async_trait]
impl ContextMenus for MenuRegistry {
    async fn create(&self, item: MenuItem) -> Result<()> {
        let mut items = self.items().await?;
        items.retain(|existing| existing.id != item.id);
        items.push(item);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&items)?).await?;
        Ok(())
    }
}

fn page_url(pages_dir: &Path, name: &str) -> Result<String> {
    let path = std::path::absolute(pages_dir.join(name))?;
    Url::from_file_path(&path)
        .map(String::from)
        .map_err(|_| AppError::Platform(format!("not a file path: {}", path.display())))
}

fn launch(url: &str) -> Result<()> {
    open::that(url).map_err(|e| AppError::Platform(format!("could not open {url}: {e}")))
}

/// Opens pages in the system browser. Relative URLs resolve to files in the
/// pages directory.
pub struct BrowserTabs {
    pages_dir: PathBuf,
    launch_browser: bool,
}

impl BrowserTabs {
    pub fn new(pages_dir: impl Into<PathBuf>, launch_browser: bool) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            launch_browser,
        }
    }
}

#[async_trait]
impl Tabs for BrowserTabs {
    async fn create(&self, url: &str) -> Result<String> {
        let resolved = match Url::parse(url) {
            Ok(absolute) => absolute.to_string(),
            Err(_) => page_url(&self.pages_dir, url)?,
        };
        if self.launch_browser {
            launch(&resolved)?;
        } else {
            tracing::info!("browser disabled, not opening {}", resolved);
        }
        Ok(resolved)
    }
}

pub const PRINT_PAGE: &str = "print-preview.html";

/// Writes the print-mode document to the pages directory and hands it to the
/// browser, which shows its print dialog on load.
pub struct BrowserPrinter {
    pages_dir: PathBuf,
    launch_browser: bool,
}

impl BrowserPrinter {
    pub fn new(pages_dir: impl Into<PathBuf>, launch_browser: bool) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            launch_browser,
        }
    }
}

#[async_trait]
impl Printer for BrowserPrinter {
    async fn print(&self, document: &str) -> Result<PrintOutcome> {
        tokio::fs::create_dir_all(&self.pages_dir).await?;
        let printable = document.replace(
            "</body>",
            "<script>window.addEventListener('load', () => window.print());</script></body>",
        );
        tokio::fs::write(self.pages_dir.join(PRINT_PAGE), printable).await?;

        if !self.launch_browser {
            tracing::info!("browser disabled, print preview left in {}", self.pages_dir.display());
            return Ok(PrintOutcome::Cancelled);
        }
        launch(&page_url(&self.pages_dir, PRINT_PAGE)?)?;
        Ok(PrintOutcome::Completed)
    }
}

/// Downloads into a directory. Object URLs live in an in-memory registry
/// until revoked.
pub struct DirectoryDownloads {
    dir: PathBuf,
    next: AtomicU64,
    blobs: Mutex<HashMap<ObjectUrl, Blob>>,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next: AtomicU64::new(1),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Object URLs created and not yet revoked.
    #[cfg(test)]
    pub fn live_urls(&self) -> usize {
        self.blobs.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }

    fn blob(&self, url: &ObjectUrl) -> Result<Blob> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| AppError::Platform("object url registry poisoned".to_string()))?;
        blobs
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Platform(format!("unknown object url {}", url.0)))
    }
}

#[async_trait]
impl Downloads for DirectoryDownloads {
    fn create_object_url(&self, blob: Blob) -> ObjectUrl {
        let url = ObjectUrl(format!(
            "blob:lightnote/{}",
            self.next.fetch_add(1, Ordering::Relaxed)
        ));
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(url.clone(), blob);
        }
        url
    }

    async fn save(&self, url: &ObjectUrl, filename: &str) -> Result<PathBuf> {
        let blob = self.blob(url)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(filename);
        tokio::fs::write(&target, &blob.bytes).await?;
        tracing::debug!("saved {} ({}, {} bytes)", target.display(), blob.mime, blob.bytes.len());
        Ok(target)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.remove(url);
        }
    }
}

/// Yes/no prompt on the terminal. Without a terminal the answer is no.
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        ConfirmPrompt::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
