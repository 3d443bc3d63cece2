//! Reading Context - 进度计算
//!
//! 由章节列表、当前索引和滚动百分比推导进度快照。
//! 纯函数，每次读取时重新计算，不缓存也不持久化。

use serde::Serialize;

use crate::domain::novel::{Chapter, ScrollFraction};
use crate::domain::text_metrics::count_words;

/// 进度快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressSnapshot {
    /// 全书词数
    pub total_words: usize,
    /// 已读词数（之前章节 + 当前章节已滚动部分）
    pub words_read: usize,
    /// 当前章节词数
    pub current_chapter_words: usize,
    /// 全书进度百分比
    pub overall_progress: u32,
    /// 当前章节进度百分比
    pub chapter_progress: u32,
    pub bookmarked_count: usize,
    pub chapter_count: usize,
}

/// 计算进度快照
///
/// 所有取整均为四舍五入（远离零），全书词数为 0 时进度为 0
pub fn calculate_progress(
    chapters: &[Chapter],
    current_index: usize,
    scroll: ScrollFraction,
) -> ProgressSnapshot {
    let counts: Vec<usize> = chapters.iter().map(|c| count_words(c.content())).collect();

    let total_words: usize = counts.iter().sum();
    let words_before: usize = counts.iter().take(current_index).sum();
    let current_chapter_words = counts.get(current_index).copied().unwrap_or(0);

    let fraction = scroll.percentage() / 100.0;
    let words_scrolled = (fraction * current_chapter_words as f64).round() as usize;
    let words_read = words_before + words_scrolled;

    let overall_progress = if total_words > 0 {
        (words_read as f64 / total_words as f64 * 100.0).round() as u32
    } else {
        0
    };

    ProgressSnapshot {
        total_words,
        words_read,
        current_chapter_words,
        overall_progress,
        chapter_progress: scroll.percentage().round() as u32,
        bookmarked_count: chapters.iter().filter(|c| c.is_bookmarked()).count(),
        chapter_count: chapters.len(),
    }
}
