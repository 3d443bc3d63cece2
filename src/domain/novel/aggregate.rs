//! Novel Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Chapter, ChapterDraft, ChapterId, NovelError};

/// Novel 聚合根
///
/// 不变量:
/// - 章节 id 唯一
/// - chapters 的顺序即阅读顺序
/// - 所有跨引用（书签、搜索结果、高亮）按 id 解析，不缓存位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    title: String,
    #[serde(default)]
    chapters: Vec<Chapter>,
}

impl Novel {
    pub fn new(title: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            title: title.into(),
            chapters,
        }
    }

    /// 校验 id 唯一性（用于加载持久化数据）
    pub fn validate(&self) -> Result<(), NovelError> {
        let mut seen = HashSet::with_capacity(self.chapters.len());
        for chapter in &self.chapters {
            if !seen.insert(chapter.id()) {
                return Err(NovelError::DuplicateChapterId(chapter.id()));
            }
        }
        Ok(())
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn chapter_at(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id() == id)
    }

    pub fn position_of(&self, id: ChapterId) -> Option<usize> {
        self.chapters.iter().position(|c| c.id() == id)
    }

    /// 已加书签的章节（按阅读顺序）
    pub fn bookmarked(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter().filter(|c| c.is_bookmarked())
    }

    /// 新章节的 id：现有最大 id + 1，空列表时为 1；id 用尽时返回 None
    pub fn next_chapter_id(&self) -> Option<ChapterId> {
        self.chapters
            .iter()
            .map(Chapter::id)
            .max()
            .unwrap_or_default()
            .next()
    }

    /// 切换书签，返回新状态；id 不存在时返回 None
    pub fn toggle_bookmark(&mut self, id: ChapterId) -> Option<bool> {
        self.chapter_mut(id).map(Chapter::toggle_bookmark)
    }

    /// 原样替换笔记（不裁剪、不校验）
    pub fn update_note(&mut self, id: ChapterId, notes: impl Into<String>) -> bool {
        match self.chapter_mut(id) {
            Some(chapter) => {
                chapter.set_notes(notes.into());
                true
            }
            None => false,
        }
    }

    /// 保存章节
    ///
    /// - 带 id 且匹配: 原地替换标题与正文，书签、笔记、位置保持不变
    /// - 不带 id: 追加到末尾，分配新 id
    /// - 带 id 但不匹配: 不做任何修改，返回 None
    pub fn save_chapter(&mut self, draft: ChapterDraft) -> Option<ChapterId> {
        match draft.id {
            Some(id) => {
                let chapter = self.chapter_mut(id)?;
                chapter.rewrite(draft.title, draft.content);
                Some(id)
            }
            None => {
                let id = self.next_chapter_id()?;
                self.chapters
                    .push(Chapter::new(id, draft.title, draft.content));
                Some(id)
            }
        }
    }

    /// 删除章节，返回 (原位置, 章节)
    pub fn remove_chapter(&mut self, id: ChapterId) -> Option<(usize, Chapter)> {
        let index = self.position_of(id)?;
        Some((index, self.chapters.remove(index)))
    }

    fn chapter_mut(&mut self, id: ChapterId) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.id() == id)
    }
}

/// 删除章节后修正当前索引
///
/// - 列表为空: 0
/// - 删除的是当前章节: max(0, 删除位置 - 1)
/// - 删除的章节在当前章节之前: 当前索引 - 1，仍指向同一章节
/// - 其他: 不变
pub fn repair_index_after_delete(current: usize, deleted: usize, remaining: usize) -> usize {
    if remaining == 0 {
        0
    } else if deleted == current {
        deleted.saturating_sub(1)
    } else if deleted < current {
        current - 1
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn novel_with(ids: &[u64]) -> Novel {
        let chapters = ids
            .iter()
            .map(|&id| Chapter::new(ChapterId::new(id), format!("Chapter {}", id), "<p>text</p>"))
            .collect();
        Novel::new("Test", chapters)
    }

    #[test]
    fn test_append_uses_max_plus_one() {
        let mut novel = novel_with(&[3, 9, 4]);
        let id = novel.save_chapter(ChapterDraft::new_chapter("New", "<p>new</p>"));
        assert_eq!(id, Some(ChapterId::new(10)));
        assert_eq!(novel.chapters().last().map(Chapter::id), Some(ChapterId::new(10)));
    }

    #[test]
    fn test_append_to_empty_novel_starts_at_one() {
        let mut novel = Novel::new("Empty", Vec::new());
        let id = novel.save_chapter(ChapterDraft::new_chapter("First", ""));
        assert_eq!(id, Some(ChapterId::new(1)));
    }

    #[test]
    fn test_edit_preserves_bookmark_notes_and_position() {
        let mut novel = novel_with(&[1, 2, 3]);
        novel.toggle_bookmark(ChapterId::new(2));
        novel.update_note(ChapterId::new(2), "  keep me  ");

        let id = novel.save_chapter(ChapterDraft::edit(ChapterId::new(2), "Renamed", "<p>new body</p>"));
        assert_eq!(id, Some(ChapterId::new(2)));

        let chapter = novel.chapter_at(1).unwrap();
        assert_eq!(chapter.id(), ChapterId::new(2));
        assert_eq!(chapter.title(), "Renamed");
        assert_eq!(chapter.content(), "<p>new body</p>");
        assert!(chapter.is_bookmarked());
        assert_eq!(chapter.notes(), "  keep me  ");
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let mut novel = novel_with(&[1, 2]);
        let before = novel.clone();
        assert_eq!(novel.save_chapter(ChapterDraft::edit(ChapterId::new(7), "X", "Y")), None);
        assert_eq!(novel, before);
    }

    #[test]
    fn test_toggle_bookmark_only_touches_target() {
        let mut novel = novel_with(&[1, 2, 3]);
        assert_eq!(novel.toggle_bookmark(ChapterId::new(3)), Some(true));
        assert_eq!(novel.toggle_bookmark(ChapterId::new(42)), None);
        let flags: Vec<bool> = novel.chapters().iter().map(Chapter::is_bookmarked).collect();
        assert_eq!(flags, vec![false, false, true]);
        assert_eq!(novel.bookmarked().count(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete_of_non_max() {
        let mut novel = novel_with(&[1, 2, 3]);
        novel.remove_chapter(ChapterId::new(2));
        assert_eq!(novel.next_chapter_id(), Some(ChapterId::new(4)));
    }

    #[test]
    fn test_append_refused_when_ids_exhausted() {
        let mut novel = novel_with(&[1, u64::MAX]);
        assert!(novel.validate().is_ok());
        assert_eq!(novel.next_chapter_id(), None);
        assert_eq!(novel.save_chapter(ChapterDraft::new_chapter("Next", "<p>x</p>")), None);
        assert_eq!(novel.chapter_count(), 2);

        // 编辑已有章节不受影响
        let edited = novel.save_chapter(ChapterDraft::edit(ChapterId::new(u64::MAX), "Last", ""));
        assert_eq!(edited, Some(ChapterId::new(u64::MAX)));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let novel = novel_with(&[1, 2, 1]);
        assert!(matches!(
            novel.validate(),
            Err(NovelError::DuplicateChapterId(id)) if id == ChapterId::new(1)
        ));
        assert!(novel_with(&[5, 1]).validate().is_ok());
    }

    #[test]
    fn test_repair_index_rules() {
        // 删除唯一章节
        assert_eq!(repair_index_after_delete(0, 0, 0), 0);
        // 删除当前章节
        assert_eq!(repair_index_after_delete(2, 2, 3), 1);
        assert_eq!(repair_index_after_delete(0, 0, 2), 0);
        // 删除之前的章节
        assert_eq!(repair_index_after_delete(3, 1, 4), 2);
        // 删除之后的章节
        assert_eq!(repair_index_after_delete(1, 3, 3), 1);
    }

    #[test]
    fn test_repair_index_keeps_logical_chapter_under_any_delete_order() {
        let mut novel = novel_with(&[1, 2, 3, 4, 5, 6]);
        let mut current = 3; // chapter 4
        for id in [1, 6, 2, 5] {
            let (deleted, _) = novel.remove_chapter(ChapterId::new(id)).unwrap();
            current = repair_index_after_delete(current, deleted, novel.chapter_count());
            assert_eq!(novel.chapter_at(current).map(Chapter::id), Some(ChapterId::new(4)));
        }
    }
}
