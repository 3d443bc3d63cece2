//! Novel Context - Errors

use thiserror::Error;

use super::ChapterId;

#[derive(Debug, Error)]
pub enum NovelError {
    #[error("重复的章节 ID: {0}")]
    DuplicateChapterId(ChapterId),
}
