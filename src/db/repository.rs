use crate::error::{AppError, Result};
use crate::models::{Collection, Note};

use super::storage::StorageAccessor;

/// Note operations layered on the storage accessor.
///
/// Every operation re-reads the whole collection and, when it mutates, writes
/// the whole collection back. Nothing is cached between calls, so two views
/// mutating at the same time can overwrite each other (last write wins).
#[derive(Clone)]
pub struct Repository {
    store: StorageAccessor,
}

impl Repository {
    pub fn new(store: StorageAccessor) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Collection> {
        self.store.get().await
    }

    /// Prepend a note. If its id is not newer than every stored id it is
    /// moved to `max + 1`, which keeps ids unique and the list newest first.
    pub async fn create(&self, mut note: Note) -> Result<Note> {
        let mut notes = self.store.get().await?;

        if let Some(max_id) = notes.iter().map(|n| n.id).max() {
            if note.id <= max_id {
                let next = max_id
                    .checked_add(1)
                    .ok_or_else(|| AppError::Storage(format!("no id left after {max_id}")))?;
                tracing::debug!("id {} already taken, using {}", note.id, next);
                note.id = next;
            }
        }

        notes.insert(0, note.clone());
        self.store.set(&notes).await?;
        Ok(note)
    }

    /// Replace a note's content. Returns whether anything was written; an
    /// unknown id or identical content is a no-op.
    pub async fn update(&self, id: i64, new_content: &str) -> Result<bool> {
        let mut notes = self.store.get().await?;

        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        if note.content == new_content {
            return Ok(false);
        }

        note.content = new_content.to_string();
        self.store.set(&notes).await?;
        Ok(true)
    }

    /// Remove a note. The collection is written back even when the id is
    /// absent. Returns whether a note was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut notes = self.store.get().await?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        self.store.set(&notes).await?;
        Ok(notes.len() != before)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.set(&Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;

    use super::*;
    use crate::db::storage::memory::MemoryStorageArea;

    fn repo() -> (Repository, Arc<MemoryStorageArea>) {
        let area = Arc::new(MemoryStorageArea::default());
        let repo = Repository::new(StorageAccessor::new(area.clone()));
        (repo, area)
    }

    fn note(id: i64, content: &str) -> Note {
        Note::new(
            id,
            content.to_string(),
            "https://x.com".to_string(),
            Some("X".to_string()),
            Local::now(),
        )
    }

    #[tokio::test]
    async fn create_prepends_and_keeps_ids_distinct() {
        let (repo, _) = repo();
        for i in 0..5 {
            // Same millisecond every time.
            repo.create(note(1_000, &format!("n{i}"))).await.unwrap();
        }

        let notes = repo.list().await.unwrap();
        assert_eq!(notes.len(), 5);
        assert_eq!(notes[0].content, "n4");
        assert_eq!(notes[4].content, "n0");

        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1_004, 1_003, 1_002, 1_001, 1_000]);
    }

    #[tokio::test]
    async fn create_after_largest_id_is_a_storage_error() {
        let (repo, area) = repo();
        repo.create(note(i64::MAX, "last")).await.unwrap();
        let base = area.writes();

        let result = repo.create(note(1, "one more")).await;
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(area.writes(), base);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_keeps_a_fresh_id() {
        let (repo, _) = repo();
        repo.create(note(10, "a")).await.unwrap();
        let stored = repo.create(note(50, "b")).await.unwrap();
        assert_eq!(stored.id, 50);
    }

    #[tokio::test]
    async fn update_with_unchanged_content_writes_once() {
        let (repo, area) = repo();
        repo.create(note(1, "hello")).await.unwrap();
        let base = area.writes();

        assert!(repo.update(1, "").await.unwrap());
        assert!(!repo.update(1, "").await.unwrap());
        assert_eq!(area.writes(), base + 1);
        assert_eq!(repo.list().await.unwrap()[0].content, "");
    }

    #[tokio::test]
    async fn update_unknown_id_does_not_write() {
        let (repo, area) = repo();
        repo.create(note(1, "hello")).await.unwrap();
        let base = area.writes();

        assert!(!repo.update(99, "changed").await.unwrap());
        assert_eq!(area.writes(), base);
    }

    #[tokio::test]
    async fn delete_missing_id_leaves_collection_alone() {
        let (repo, _) = repo();
        repo.create(note(1, "a")).await.unwrap();
        repo.create(note(2, "b")).await.unwrap();
        let before = repo.list().await.unwrap();

        assert!(!repo.delete(42).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_note() {
        let (repo, _) = repo();
        repo.create(note(1, "a")).await.unwrap();
        repo.create(note(2, "b")).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        let notes = repo.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 2);
    }

    #[tokio::test]
    async fn clear_then_list_is_empty() {
        let (repo, _) = repo();
        repo.create(note(1, "a")).await.unwrap();
        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
