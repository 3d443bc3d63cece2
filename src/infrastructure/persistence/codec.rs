//! 存储编码
//!
//! 所有存储实现共用的 JSON 编码与键名

use crate::application::ports::StorageError;
use crate::domain::novel::Novel;

/// 小说记录键
pub const NOVEL_KEY: &str = "novel";

/// 最后阅读章节索引键
pub const CHAPTER_INDEX_KEY: &str = "last_chapter_index";

pub fn encode_novel(novel: &Novel) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(novel).map_err(|e| StorageError::SerializationError(e.to_string()))
}

pub fn decode_novel(bytes: &[u8]) -> Result<Novel, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
}

pub fn encode_index(index: usize) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(&index).map_err(|e| StorageError::SerializationError(e.to_string()))
}

pub fn decode_index(bytes: &[u8]) -> Result<usize, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
}
