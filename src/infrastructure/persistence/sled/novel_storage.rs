//! Sled-based Novel Storage Implementation
//!
//! 两条独立记录：`novel` 与 `last_chapter_index`，每次写入后 flush

use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{NovelStoragePort, StorageError};
use crate::domain::novel::Novel;
use crate::infrastructure::persistence::codec::{
    decode_index, decode_novel, encode_index, encode_novel, CHAPTER_INDEX_KEY, NOVEL_KEY,
};

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStorageConfig {
    /// 数据库路径
    pub db_path: String,
}

/// Sled 小说存储
pub struct SledNovelStorage {
    db: Db,
}

impl SledNovelStorage {
    /// 打开（或创建）数据库
    pub fn new(config: &SledStorageConfig) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledNovelStorage initialized");

        Ok(Self { db })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let config = SledStorageConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read(&self, key: &str) -> Result<Option<sled::IVec>, StorageError> {
        self.db
            .get(key)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.db
            .insert(key, bytes)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl NovelStoragePort for SledNovelStorage {
    fn load_novel(&self) -> Result<Option<Novel>, StorageError> {
        match self.read(NOVEL_KEY)? {
            Some(bytes) => decode_novel(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save_novel(&self, novel: &Novel) -> Result<(), StorageError> {
        let bytes = encode_novel(novel)?;
        let size = bytes.len();
        self.write(NOVEL_KEY, bytes)?;
        tracing::debug!(size_bytes = size, "Novel persisted");
        Ok(())
    }

    fn load_chapter_index(&self) -> Result<Option<usize>, StorageError> {
        match self.read(CHAPTER_INDEX_KEY)? {
            Some(bytes) => decode_index(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save_chapter_index(&self, index: usize) -> Result<(), StorageError> {
        self.write(CHAPTER_INDEX_KEY, encode_index(index)?)?;
        tracing::debug!(index = index, "Chapter index persisted");
        Ok(())
    }
}
