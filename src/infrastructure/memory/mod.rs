//! Memory Layer - In-Memory Storage
//!
//! 内存版小说存储，用于测试与 `storage.ephemeral = true` 的临时运行

mod novel_storage;

pub use novel_storage::InMemoryNovelStorage;
