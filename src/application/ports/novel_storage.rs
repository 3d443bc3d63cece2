//! Novel Storage Port - 出站端口
//!
//! 阅读状态的持久化抽象，两条相互独立的记录:
//! - 小说数据（标题 + 全部章节）
//! - 最后阅读的章节索引
//!
//! 具体实现在 infrastructure 层（Sled / 内存）

use thiserror::Error;

use crate::domain::novel::Novel;

/// Storage 错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Novel Storage Port
///
/// 单一写入者，调用方不会并发写入
pub trait NovelStoragePort: Send + Sync {
    /// 读取小说；记录不存在返回 `Ok(None)`，无法解析返回 `Err`
    fn load_novel(&self) -> Result<Option<Novel>, StorageError>;

    /// 整体覆盖写入小说
    fn save_novel(&self, novel: &Novel) -> Result<(), StorageError>;

    /// 读取最后阅读的章节索引
    fn load_chapter_index(&self) -> Result<Option<usize>, StorageError>;

    /// 写入最后阅读的章节索引
    fn save_chapter_index(&self, index: usize) -> Result<(), StorageError>;
}
