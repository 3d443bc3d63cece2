//! Sled 持久化

mod novel_storage;

pub use novel_storage::{SledNovelStorage, SledStorageConfig};
