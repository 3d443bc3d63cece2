//! Persistence Layer - 数据持久化
//!
//! Sled 存储实现与共享编码

pub mod codec;
pub mod sled;

pub use self::sled::{SledNovelStorage, SledStorageConfig};
