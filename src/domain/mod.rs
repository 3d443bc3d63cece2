//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Novel Context: 小说与章节
//! - Reading Context: 进度、搜索、导航

pub mod novel;
pub mod reading;

// 共享的文本度量
mod text_metrics;

pub use text_metrics::{collapse_whitespace, count_words, normalize_text, strip_markup};
