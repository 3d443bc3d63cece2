//! Novel Store - 小说状态的唯一写入者
//!
//! 持有小说聚合与当前章节索引，每次成功修改后整体重新持久化。
//! 持久化失败只记录日志，不回滚也不阻塞内存中的修改。

use std::sync::Arc;

use crate::application::ports::{ConfirmationPort, NovelStoragePort};
use crate::domain::novel::{
    repair_index_after_delete, seed_novel, Chapter, ChapterDraft, ChapterId, Novel,
};

/// 删除结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 已删除
    Deleted { chapter: Chapter, position: usize },
    /// 用户取消
    Declined,
    /// 章节不存在
    NotFound,
}

/// Novel Store
pub struct NovelStore {
    storage: Arc<dyn NovelStoragePort>,
    novel: Novel,
    current_index: usize,
}

impl NovelStore {
    /// 从存储加载
    ///
    /// - 小说不存在或无法解析: 使用内置示例小说并立即写回
    /// - 索引不存在、无法解析或越界: 使用 0
    pub fn open(storage: Arc<dyn NovelStoragePort>) -> Self {
        let (novel, fallback) = match storage.load_novel() {
            Ok(Some(novel)) => match novel.validate() {
                Ok(()) => (novel, false),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored novel is inconsistent, using seed novel");
                    (seed_novel(), true)
                }
            },
            Ok(None) => {
                tracing::info!("No stored novel, using seed novel");
                (seed_novel(), true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load stored novel, using seed novel");
                (seed_novel(), true)
            }
        };

        let current_index = match storage.load_chapter_index() {
            Ok(Some(index)) if index < novel.chapter_count() => index,
            Ok(Some(index)) => {
                tracing::warn!(
                    index = index,
                    chapter_count = novel.chapter_count(),
                    "Stored chapter index out of range, using 0"
                );
                0
            }
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load chapter index, using 0");
                0
            }
        };

        let store = Self {
            storage,
            novel,
            current_index,
        };

        if fallback {
            store.persist_novel();
        }

        tracing::info!(
            title = %store.novel.title(),
            chapter_count = store.novel.chapter_count(),
            current_index = store.current_index,
            "Novel store opened"
        );

        store
    }

    // Getters
    pub fn novel(&self) -> &Novel {
        &self.novel
    }

    pub fn chapters(&self) -> &[Chapter] {
        self.novel.chapters()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.novel.chapter_at(self.current_index)
    }

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.novel.chapter(id)
    }

    pub fn position_of(&self, id: ChapterId) -> Option<usize> {
        self.novel.position_of(id)
    }

    pub fn bookmarked_chapters(&self) -> Vec<&Chapter> {
        self.novel.bookmarked().collect()
    }

    /// 按 id 选择章节；不存在时不做任何事并返回 false
    pub fn select_chapter(&mut self, id: ChapterId) -> bool {
        match self.novel.position_of(id) {
            Some(index) => {
                self.set_current_index(index);
                true
            }
            None => {
                tracing::debug!(chapter_id = %id, "Select ignored, chapter not found");
                false
            }
        }
    }

    /// 设置当前索引（限制在 [0, len-1]），只有值变化时才写入存储
    pub fn set_current_index(&mut self, index: usize) -> bool {
        let index = index.min(self.novel.chapter_count().saturating_sub(1));
        if index == self.current_index {
            return false;
        }
        self.current_index = index;
        self.persist_index();
        true
    }

    pub fn toggle_bookmark(&mut self, id: ChapterId) -> Option<bool> {
        let bookmarked = self.novel.toggle_bookmark(id);
        match bookmarked {
            Some(state) => {
                tracing::info!(chapter_id = %id, bookmarked = state, "Bookmark toggled");
                self.persist_novel();
            }
            None => tracing::debug!(chapter_id = %id, "Bookmark ignored, chapter not found"),
        }
        bookmarked
    }

    pub fn update_note(&mut self, id: ChapterId, notes: impl Into<String>) -> bool {
        let updated = self.novel.update_note(id, notes);
        if updated {
            tracing::info!(chapter_id = %id, "Note updated");
            self.persist_novel();
        } else {
            tracing::debug!(chapter_id = %id, "Note ignored, chapter not found");
        }
        updated
    }

    /// 保存章节（编辑或新建），返回章节 id
    pub fn save_chapter(&mut self, draft: ChapterDraft) -> Option<ChapterId> {
        let requested = draft.id;
        match self.novel.save_chapter(draft) {
            Some(id) => {
                if requested.is_some() {
                    tracing::info!(chapter_id = %id, "Chapter updated");
                } else {
                    tracing::info!(chapter_id = %id, "Chapter created");
                }
                self.persist_novel();
                Some(id)
            }
            None => {
                match requested {
                    Some(id) => tracing::warn!(chapter_id = %id, "Save ignored, chapter not found"),
                    None => tracing::warn!(
                        chapter_count = self.novel.chapter_count(),
                        "Save ignored, chapter ids exhausted"
                    ),
                }
                None
            }
        }
    }

    /// 删除章节
    ///
    /// 必须先经过确认；删除后按规则修正当前索引，始终指向同一逻辑章节或其前一章
    pub fn delete_chapter(&mut self, id: ChapterId, confirm: &dyn ConfirmationPort) -> DeleteOutcome {
        let Some(chapter) = self.novel.chapter(id) else {
            tracing::debug!(chapter_id = %id, "Delete ignored, chapter not found");
            return DeleteOutcome::NotFound;
        };

        if !confirm.confirm_delete(chapter) {
            tracing::info!(chapter_id = %id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        let Some((position, chapter)) = self.novel.remove_chapter(id) else {
            return DeleteOutcome::NotFound;
        };

        let repaired = repair_index_after_delete(
            self.current_index,
            position,
            self.novel.chapter_count(),
        );

        tracing::info!(
            chapter_id = %id,
            position = position,
            current_index = repaired,
            remaining = self.novel.chapter_count(),
            "Chapter deleted"
        );

        self.persist_novel();
        if repaired != self.current_index {
            self.current_index = repaired;
            self.persist_index();
        }

        DeleteOutcome::Deleted { chapter, position }
    }

    fn persist_novel(&self) {
        if let Err(e) = self.storage.save_novel(&self.novel) {
            tracing::error!(error = %e, "Failed to persist novel");
        }
    }

    fn persist_index(&self) {
        if let Err(e) = self.storage.save_chapter_index(self.current_index) {
            tracing::error!(
                error = %e,
                index = self.current_index,
                "Failed to persist chapter index"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AlwaysConfirm, NeverConfirm};
    use crate::domain::novel::SEED_TITLE;
    use crate::infrastructure::memory::InMemoryNovelStorage;

    fn novel_with(ids: &[u64]) -> Novel {
        let chapters = ids
            .iter()
            .map(|&id| Chapter::new(ChapterId::new(id), format!("Chapter {}", id), "<p>a b c</p>"))
            .collect();
        Novel::new("Test Novel", chapters)
    }

    fn open_with(ids: &[u64], index: usize) -> (Arc<InMemoryNovelStorage>, NovelStore) {
        let storage = Arc::new(InMemoryNovelStorage::with_state(&novel_with(ids), index));
        let store = NovelStore::open(storage.clone());
        (storage, store)
    }

    fn ids(store: &NovelStore) -> Vec<u64> {
        store.chapters().iter().map(|c| c.id().value()).collect()
    }

    #[test]
    fn test_open_empty_storage_uses_and_persists_seed() {
        let storage = Arc::new(InMemoryNovelStorage::new());
        let store = NovelStore::open(storage.clone());

        assert_eq!(store.novel().title(), SEED_TITLE);
        assert_eq!(store.current_index(), 0);
        assert_eq!(storage.load_novel().unwrap(), Some(seed_novel()));
    }

    #[test]
    fn test_open_corrupt_blob_falls_back_to_seed() {
        let storage = Arc::new(InMemoryNovelStorage::new());
        storage.put_raw_novel(b"{not json".to_vec());
        let store = NovelStore::open(storage.clone());
        assert_eq!(store.novel(), &seed_novel());
    }

    #[test]
    fn test_open_duplicate_ids_falls_back_to_seed() {
        let (_, store) = open_with(&[1, 1], 0);
        assert_eq!(store.novel().title(), SEED_TITLE);
    }

    #[test]
    fn test_open_out_of_range_index_uses_zero() {
        let (_, store) = open_with(&[1, 2, 3], 3);
        assert_eq!(store.current_index(), 0);

        let (_, store) = open_with(&[1, 2, 3], 2);
        assert_eq!(store.current_index(), 2);
    }

    #[test]
    fn test_open_unparsable_index_uses_zero() {
        let (storage, _) = open_with(&[1, 2, 3], 1);
        storage.put_raw_index(b"\"two\"".to_vec());
        let store = NovelStore::open(storage);
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_select_chapter_persists_index() {
        let (storage, mut store) = open_with(&[10, 20, 30], 0);
        assert!(store.select_chapter(ChapterId::new(30)));
        assert_eq!(store.current_index(), 2);
        assert_eq!(storage.load_chapter_index().unwrap(), Some(2));

        assert!(!store.select_chapter(ChapterId::new(99)));
        assert_eq!(store.current_index(), 2);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (storage, mut store) = open_with(&[1, 2], 0);
        store.toggle_bookmark(ChapterId::new(2));
        store.update_note(ChapterId::new(1), "remember this");
        let new_id = store.save_chapter(ChapterDraft::new_chapter("Three", "<p>x</p>"));
        assert_eq!(new_id, Some(ChapterId::new(3)));

        let persisted = storage.load_novel().unwrap().unwrap();
        assert_eq!(&persisted, store.novel());
        assert!(persisted.chapter(ChapterId::new(2)).unwrap().is_bookmarked());
        assert_eq!(persisted.chapter(ChapterId::new(1)).unwrap().notes(), "remember this");
    }

    #[test]
    fn test_new_chapter_refused_when_ids_exhausted() {
        let novel = Novel::new(
            "T",
            vec![Chapter::new(ChapterId::new(u64::MAX), "Last", "<p>end</p>")],
        );
        let storage = Arc::new(InMemoryNovelStorage::with_state(&novel, 0));
        let mut store = NovelStore::open(storage.clone());
        assert_eq!(store.novel(), &novel);

        assert_eq!(store.save_chapter(ChapterDraft::new_chapter("Next", "<p>x</p>")), None);
        assert_eq!(store.chapters().len(), 1);
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_delete_current_chapter_moves_to_previous() {
        let (storage, mut store) = open_with(&[1, 2, 3], 2);
        let outcome = store.delete_chapter(ChapterId::new(3), &AlwaysConfirm);
        assert!(matches!(outcome, DeleteOutcome::Deleted { position: 2, .. }));
        assert_eq!(store.current_index(), 1);
        assert_eq!(storage.load_chapter_index().unwrap(), Some(1));

        let (_, mut store) = open_with(&[1, 2, 3], 0);
        store.delete_chapter(ChapterId::new(1), &AlwaysConfirm);
        assert_eq!(store.current_index(), 0);
        assert_eq!(store.current_chapter().map(|c| c.id()), Some(ChapterId::new(2)));
    }

    #[test]
    fn test_delete_last_remaining_chapter() {
        let (storage, mut store) = open_with(&[7], 0);
        store.delete_chapter(ChapterId::new(7), &AlwaysConfirm);
        assert!(store.chapters().is_empty());
        assert_eq!(store.current_index(), 0);
        assert!(store.current_chapter().is_none());
        assert!(storage.load_novel().unwrap().unwrap().is_empty());

        // 空列表后新建章节从 1 开始
        assert_eq!(
            store.save_chapter(ChapterDraft::new_chapter("Fresh", "")),
            Some(ChapterId::new(1))
        );
    }

    #[test]
    fn test_delete_before_and_after_current() {
        let (_, mut store) = open_with(&[1, 2, 3, 4], 2);
        store.delete_chapter(ChapterId::new(1), &AlwaysConfirm);
        assert_eq!(store.current_index(), 1);
        assert_eq!(store.current_chapter().map(|c| c.id()), Some(ChapterId::new(3)));

        store.delete_chapter(ChapterId::new(4), &AlwaysConfirm);
        assert_eq!(store.current_index(), 1);
        assert_eq!(ids(&store), vec![2, 3]);
    }

    #[test]
    fn test_delete_declined_changes_nothing() {
        let (storage, mut store) = open_with(&[1, 2], 1);
        let before = storage.load_novel().unwrap();
        let writes = storage.write_count();

        assert_eq!(store.delete_chapter(ChapterId::new(2), &NeverConfirm), DeleteOutcome::Declined);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.current_index(), 1);
        assert_eq!(storage.load_novel().unwrap(), before);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_, mut store) = open_with(&[1, 2], 1);
        let asked = std::cell::Cell::new(false);
        let confirm = |_: &Chapter| {
            asked.set(true);
            true
        };
        assert_eq!(store.delete_chapter(ChapterId::new(5), &confirm), DeleteOutcome::NotFound);
        assert!(!asked.get());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let (storage, mut store) = open_with(&[1, 2], 0);
        storage.fail_writes(true);

        assert_eq!(store.toggle_bookmark(ChapterId::new(1)), Some(true));
        assert!(store.select_chapter(ChapterId::new(2)));
        assert!(store.chapter(ChapterId::new(1)).unwrap().is_bookmarked());
        assert_eq!(store.current_index(), 1);

        // 存储中仍是旧数据
        storage.fail_writes(false);
        assert!(!storage.load_novel().unwrap().unwrap().chapters()[0].is_bookmarked());
        assert_eq!(storage.load_chapter_index().unwrap(), Some(0));
    }

    #[test]
    fn test_index_persisted_independently_of_novel() {
        let (storage, mut store) = open_with(&[1, 2, 3], 0);
        let writes = storage.write_count();
        store.select_chapter(ChapterId::new(2));
        // 只写入索引，不重写小说
        assert_eq!(storage.write_count(), writes + 1);
        assert_eq!(storage.load_chapter_index().unwrap(), Some(1));
    }
}
