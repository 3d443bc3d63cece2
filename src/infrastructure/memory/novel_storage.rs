//! In-Memory Novel Storage Implementation
//!
//! 与 Sled 实现使用相同的编码，便于测试与临时运行

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::application::ports::{NovelStoragePort, StorageError};
use crate::domain::novel::Novel;
use crate::infrastructure::persistence::codec::{
    decode_index, decode_novel, encode_index, encode_novel, CHAPTER_INDEX_KEY, NOVEL_KEY,
};

/// 内存小说存储
pub struct InMemoryNovelStorage {
    records: DashMap<&'static str, Vec<u8>>,
    fail_writes: AtomicBool,
    write_count: AtomicUsize,
}

impl InMemoryNovelStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            fail_writes: AtomicBool::new(false),
            write_count: AtomicUsize::new(0),
        }
    }

    /// 预置小说与索引（不计入写入次数）
    pub fn with_state(novel: &Novel, index: usize) -> Self {
        let storage = Self::new();
        if let Ok(bytes) = encode_novel(novel) {
            storage.records.insert(NOVEL_KEY, bytes);
        }
        if let Ok(bytes) = encode_index(index) {
            storage.records.insert(CHAPTER_INDEX_KEY, bytes);
        }
        storage
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 直接写入原始字节（模拟损坏数据）
    pub fn put_raw_novel(&self, bytes: Vec<u8>) {
        self.records.insert(NOVEL_KEY, bytes);
    }

    pub fn put_raw_index(&self, bytes: Vec<u8>) {
        self.records.insert(CHAPTER_INDEX_KEY, bytes);
    }

    /// 模拟存储不可用（例如配额耗尽）
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// 成功写入次数
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::Relaxed)
    }

    fn write(&self, key: &'static str, bytes: Vec<u8>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::IoError("storage quota exceeded".to_string()));
        }
        self.records.insert(key, bytes);
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Default for InMemoryNovelStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NovelStoragePort for InMemoryNovelStorage {
    fn load_novel(&self) -> Result<Option<Novel>, StorageError> {
        self.records
            .get(NOVEL_KEY)
            .map(|bytes| decode_novel(bytes.value()))
            .transpose()
    }

    fn save_novel(&self, novel: &Novel) -> Result<(), StorageError> {
        self.write(NOVEL_KEY, encode_novel(novel)?)
    }

    fn load_chapter_index(&self) -> Result<Option<usize>, StorageError> {
        self.records
            .get(CHAPTER_INDEX_KEY)
            .map(|bytes| decode_index(bytes.value()))
            .transpose()
    }

    fn save_chapter_index(&self, index: usize) -> Result<(), StorageError> {
        self.write(CHAPTER_INDEX_KEY, encode_index(index)?)
    }
}
