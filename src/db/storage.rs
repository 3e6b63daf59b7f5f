use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::Collection;

/// Key under which the note collection is persisted.
pub const NOTES_KEY: &str = "notes";

/// Key-value storage area holding JSON values, modelled on the extension
/// `storage.local` area. A `set` replaces the value for its key as a whole.
#[async_trait]
pub trait StorageArea: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Storage area backed by a single JSON object file.
///
/// Writes go to a sibling temp file which is then renamed over the original,
/// so a reader sees either the old or the new object, never a torn one. The
/// mutex only orders writers inside this process; two processes writing at
/// once still race and the last rename wins.
pub struct LocalStorageArea {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStorageArea {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_object(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl StorageArea for LocalStorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut object = self.read_object().await?;
        Ok(object.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut object = self.read_object().await?;
        object.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&Value::Object(object))?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Reads and writes the note collection as one value under [`NOTES_KEY`].
#[derive(Clone)]
pub struct StorageAccessor {
    area: Arc<dyn StorageArea>,
}

impl StorageAccessor {
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        Self { area }
    }

    /// The persisted collection, or an empty one if nothing was stored yet.
    pub async fn get(&self) -> Result<Collection> {
        match self.area.get(NOTES_KEY).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn set(&self, notes: &Collection) -> Result<()> {
        let value = serde_json::to_value(notes)?;
        self.area.set(NOTES_KEY, value).await
    }
}
