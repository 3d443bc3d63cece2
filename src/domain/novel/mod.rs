//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 小说聚合（标题 + 有序章节）
//! - 章节实体（书签、笔记）
//! - 删除后的索引修正规则
//! - 内置示例小说

mod aggregate;
mod entities;
mod errors;
mod seed;
mod value_objects;

pub use aggregate::{repair_index_after_delete, Novel};
pub use entities::{Chapter, ChapterDraft};
pub use errors::NovelError;
pub use seed::{seed_novel, SEED_TITLE};
pub use value_objects::{ChapterId, ScrollFraction};
