//! Reader Queries - 暴露给展示层的只读视图
//!
//! 每次查询都从当前状态重新计算

use serde::Serialize;

use crate::domain::count_words;
use crate::domain::normalize_text;
use crate::domain::novel::{Chapter, ChapterId};
use crate::domain::reading::{HighlightRequest, Panels, ProgressSnapshot, ViewMode};

/// 章节列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub id: ChapterId,
    pub title: String,
    pub bookmarked: bool,
    pub has_notes: bool,
    pub word_count: usize,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id(),
            title: chapter.title().to_string(),
            bookmarked: chapter.is_bookmarked(),
            has_notes: !chapter.notes().is_empty(),
            word_count: count_words(chapter.content()),
        }
    }
}

/// 章节详情
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterDetail {
    pub id: ChapterId,
    pub position: usize,
    pub title: String,
    pub content: String,
    pub bookmarked: bool,
    pub notes: String,
    pub word_count: usize,
}

impl ChapterDetail {
    pub fn new(chapter: &Chapter, position: usize) -> Self {
        Self {
            id: chapter.id(),
            position,
            title: chapter.title().to_string(),
            content: chapter.content().to_string(),
            bookmarked: chapter.is_bookmarked(),
            notes: chapter.notes().to_string(),
            word_count: count_words(chapter.content()),
        }
    }
}

/// 概览模式下的章节（纯文本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewChapter {
    pub id: ChapterId,
    pub title: String,
    pub text: String,
    pub bookmarked: bool,
    pub word_count: usize,
}

impl From<&Chapter> for OverviewChapter {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id(),
            title: chapter.title().to_string(),
            text: normalize_text(chapter.content()),
            bookmarked: chapter.is_bookmarked(),
            word_count: count_words(chapter.content()),
        }
    }
}

/// 阅读器完整状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReaderSnapshot {
    pub title: String,
    pub current_index: usize,
    pub current_chapter: Option<ChapterDetail>,
    pub chapters: Vec<ChapterSummary>,
    pub progress: ProgressSnapshot,
    pub scroll_percentage: f64,
    pub highlight: Option<HighlightRequest>,
    pub view_mode: ViewMode,
    pub panels: Panels,
    pub is_first_chapter: bool,
    pub is_last_chapter: bool,
}
