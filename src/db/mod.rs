mod repository;
pub mod storage;

pub use repository::Repository;
pub use storage::{LocalStorageArea, StorageAccessor};
