//! Reader Session - 阅读状态的唯一持有者
//!
//! 组合 NovelStore、Navigator 与实时滚动百分比，
//! 按顺序处理展示层发来的命令；派生值在每次查询时同步重新计算。

use std::sync::Arc;

use crate::application::commands::{CommandOutcome, ReaderCommand};
use crate::application::error::ApplicationError;
use crate::application::ports::{ConfirmationPort, NovelStoragePort};
use crate::application::queries::{ChapterDetail, ChapterSummary, OverviewChapter, ReaderSnapshot};
use crate::application::store::{DeleteOutcome, NovelStore};
use crate::domain::novel::{Chapter, ChapterDraft, ChapterId, ScrollFraction};
use crate::domain::reading::{
    calculate_progress, search_chapters, HighlightRequest, Navigator, Panel, ProgressSnapshot,
    SearchOptions, SearchResults, ViewMode,
};

/// 阅读会话
pub struct ReaderSession {
    store: NovelStore,
    navigator: Navigator,
    scroll: ScrollFraction,
    search_options: SearchOptions,
}

impl ReaderSession {
    /// 从存储加载并创建会话
    pub fn open(storage: Arc<dyn NovelStoragePort>, search_options: SearchOptions) -> Self {
        Self {
            store: NovelStore::open(storage),
            navigator: Navigator::new(),
            scroll: ScrollFraction::TOP,
            search_options,
        }
    }

    pub fn store(&self) -> &NovelStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn scroll(&self) -> ScrollFraction {
        self.scroll
    }

    // ========== Commands ==========

    /// 执行命令
    ///
    /// 删除章节时通过 `confirm` 询问用户；其他命令不会调用它
    pub fn execute(&mut self, command: ReaderCommand, confirm: &dyn ConfirmationPort) -> CommandOutcome {
        let name = command.name();
        let outcome = match command {
            ReaderCommand::SelectChapter { chapter_id } => applied(self.select_chapter(chapter_id)),
            ReaderCommand::SelectSearchResult(request) => applied(self.select_search_result(request)),
            ReaderCommand::NextChapter => applied(self.next_chapter()),
            ReaderCommand::PreviousChapter => applied(self.previous_chapter()),
            ReaderCommand::ToggleBookmark { chapter_id } => self
                .toggle_bookmark(chapter_id)
                .map_or(CommandOutcome::Ignored, CommandOutcome::Bookmark),
            ReaderCommand::UpdateNote { chapter_id, notes } => {
                applied(self.update_note(chapter_id, notes))
            }
            ReaderCommand::SaveChapter(draft) => self
                .save_chapter(draft)
                .map_or(CommandOutcome::Ignored, CommandOutcome::Saved),
            ReaderCommand::DeleteChapter { chapter_id } => {
                match self.delete_chapter(chapter_id, confirm) {
                    DeleteOutcome::Deleted { .. } => CommandOutcome::Applied,
                    DeleteOutcome::Declined => CommandOutcome::Declined,
                    DeleteOutcome::NotFound => CommandOutcome::Ignored,
                }
            }
            ReaderCommand::UpdateScroll { percentage } => {
                self.update_scroll(percentage);
                CommandOutcome::Applied
            }
            ReaderCommand::HighlightApplied => self
                .acknowledge_highlight()
                .map_or(CommandOutcome::Ignored, CommandOutcome::HighlightConsumed),
            ReaderCommand::ToggleView => CommandOutcome::View(self.toggle_view()),
            ReaderCommand::SetView(mode) => {
                self.set_view(mode);
                CommandOutcome::View(mode)
            }
            ReaderCommand::TogglePanel(panel) => match self.toggle_panel(panel) {
                Some(open) => CommandOutcome::Panel { panel, open },
                None => CommandOutcome::Ignored,
            },
        };

        tracing::debug!(command = name, applied = outcome.applied(), "Reader command executed");
        outcome
    }

    /// 选择章节：设置当前索引、清除高亮、退出概览
    pub fn select_chapter(&mut self, id: ChapterId) -> bool {
        if !self.switch_chapter(|store| store.select_chapter(id)) {
            return false;
        }
        self.navigator.chapter_selected();
        true
    }

    /// 选择搜索结果：跳转到所在章节并设置待执行的高亮
    pub fn select_search_result(&mut self, request: HighlightRequest) -> bool {
        let chapter_id = request.chapter_id;
        if !self.switch_chapter(|store| store.select_chapter(chapter_id)) {
            return false;
        }
        tracing::debug!(
            chapter_id = %chapter_id,
            result_index = request.result_index,
            "Highlight requested"
        );
        self.navigator.search_result_selected(request);
        true
    }

    /// 下一章；已是最后一章时不做任何事
    pub fn next_chapter(&mut self) -> bool {
        if self.is_last_chapter() {
            return false;
        }
        let next = self.store.current_index() + 1;
        self.step_to(next)
    }

    /// 上一章；已是第一章时不做任何事
    pub fn previous_chapter(&mut self) -> bool {
        if self.is_first_chapter() {
            return false;
        }
        let previous = self.store.current_index() - 1;
        self.step_to(previous)
    }

    pub fn toggle_bookmark(&mut self, id: ChapterId) -> Option<bool> {
        self.store.toggle_bookmark(id)
    }

    pub fn update_note(&mut self, id: ChapterId, notes: impl Into<String>) -> bool {
        self.store.update_note(id, notes)
    }

    pub fn save_chapter(&mut self, draft: ChapterDraft) -> Option<ChapterId> {
        self.store.save_chapter(draft)
    }

    /// 删除章节；当前章节因此改变时滚动位置归零
    pub fn delete_chapter(&mut self, id: ChapterId, confirm: &dyn ConfirmationPort) -> DeleteOutcome {
        let before = self.current_chapter_id();
        let outcome = self.store.delete_chapter(id, confirm);
        if matches!(outcome, DeleteOutcome::Deleted { .. }) && self.current_chapter_id() != before {
            self.scroll = ScrollFraction::TOP;
        }
        outcome
    }

    /// 更新滚动百分比（只保留最新值）
    pub fn update_scroll(&mut self, percentage: f64) {
        self.scroll = ScrollFraction::new(percentage);
    }

    /// 展示层报告高亮已完成
    pub fn acknowledge_highlight(&mut self) -> Option<HighlightRequest> {
        self.navigator.acknowledge_highlight()
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        let mode = self.navigator.toggle_view();
        tracing::debug!(view_mode = mode.as_str(), "View mode toggled");
        mode
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        self.navigator.set_view(mode);
    }

    pub fn toggle_panel(&mut self, panel: Panel) -> Option<bool> {
        self.navigator.toggle_panel(panel)
    }

    // ========== Queries ==========

    pub fn chapters(&self) -> &[Chapter] {
        self.store.chapters()
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.store.current_chapter()
    }

    pub fn is_first_chapter(&self) -> bool {
        self.store.current_index() == 0
    }

    pub fn is_last_chapter(&self) -> bool {
        self.store.current_index() + 1 >= self.store.chapters().len()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        calculate_progress(self.store.chapters(), self.store.current_index(), self.scroll)
    }

    pub fn search(&self, query: &str) -> SearchResults {
        search_chapters(self.store.chapters(), query, &self.search_options)
    }

    pub fn bookmarks(&self) -> Vec<ChapterSummary> {
        self.store
            .bookmarked_chapters()
            .into_iter()
            .map(ChapterSummary::from)
            .collect()
    }

    pub fn chapter_summaries(&self) -> Vec<ChapterSummary> {
        self.store.chapters().iter().map(ChapterSummary::from).collect()
    }

    pub fn chapter_detail(&self, id: ChapterId) -> Result<ChapterDetail, ApplicationError> {
        let position = self
            .store
            .position_of(id)
            .ok_or_else(|| ApplicationError::not_found("Chapter", id))?;
        let chapter = self
            .store
            .chapter(id)
            .ok_or_else(|| ApplicationError::not_found("Chapter", id))?;
        Ok(ChapterDetail::new(chapter, position))
    }

    /// 概览模式内容（全部章节纯文本）
    pub fn overview(&self) -> Vec<OverviewChapter> {
        self.store.chapters().iter().map(OverviewChapter::from).collect()
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        let current_index = self.store.current_index();
        ReaderSnapshot {
            title: self.store.novel().title().to_string(),
            current_index,
            current_chapter: self
                .store
                .current_chapter()
                .map(|chapter| ChapterDetail::new(chapter, current_index)),
            chapters: self.chapter_summaries(),
            progress: self.progress(),
            scroll_percentage: self.scroll.percentage(),
            highlight: self.navigator.highlight().pending().cloned(),
            view_mode: self.navigator.view_mode(),
            panels: self.navigator.panels(),
            is_first_chapter: self.is_first_chapter(),
            is_last_chapter: self.is_last_chapter(),
        }
    }

    // ========== Internals ==========

    fn current_chapter_id(&self) -> Option<ChapterId> {
        self.store.current_chapter().map(Chapter::id)
    }

    /// 执行切换章节的操作；章节确实改变时滚动归零
    fn switch_chapter(&mut self, select: impl FnOnce(&mut NovelStore) -> bool) -> bool {
        let before = self.current_chapter_id();
        if !select(&mut self.store) {
            return false;
        }
        if self.current_chapter_id() != before {
            self.scroll = ScrollFraction::TOP;
        }
        true
    }

    fn step_to(&mut self, index: usize) -> bool {
        let changed = self.store.set_current_index(index);
        if changed {
            self.scroll = ScrollFraction::TOP;
            self.navigator.chapter_stepped();
        }
        changed
    }
}

fn applied(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AlwaysConfirm, NeverConfirm};
    use crate::domain::novel::Novel;
    use crate::domain::reading::Highlight;
    use crate::infrastructure::memory::InMemoryNovelStorage;

    fn session_with(chapters: &[(u64, &str)], index: usize) -> ReaderSession {
        let chapters = chapters
            .iter()
            .map(|&(id, content)| Chapter::new(ChapterId::new(id), format!("Chapter {}", id), content))
            .collect();
        let storage = InMemoryNovelStorage::with_state(&Novel::new("Test", chapters), index);
        ReaderSession::open(Arc::new(storage), SearchOptions::default())
    }

    fn three_chapters() -> ReaderSession {
        session_with(
            &[
                (1, "<p>one two three four</p>"),
                (2, "<p>the lamp burns</p><p>the lamp fades</p>"),
                (3, "<p>lamp</p>"),
            ],
            0,
        )
    }

    fn request_for(session: &ReaderSession, query: &str, hit: usize) -> HighlightRequest {
        let results = session.search(query);
        let hit = &results.hits[hit];
        HighlightRequest {
            chapter_id: hit.chapter_id,
            result_index: hit.result_index,
            search_term: results.query.clone(),
        }
    }

    #[test]
    fn test_search_result_highlight_lifecycle() {
        let mut session = three_chapters();
        let request = request_for(&session, "LAMP", 1);
        assert_eq!(request.chapter_id, ChapterId::new(2));
        assert_eq!(request.result_index, 1);

        assert!(session.select_search_result(request.clone()));
        assert_eq!(session.current_chapter().map(Chapter::id), Some(ChapterId::new(2)));
        assert_eq!(session.snapshot().highlight, Some(request.clone()));

        assert_eq!(session.acknowledge_highlight(), Some(request));
        assert_eq!(session.acknowledge_highlight(), None);
        assert_eq!(session.navigator().highlight(), &Highlight::None);
    }

    #[test]
    fn test_manual_selection_clears_highlight() {
        let mut session = three_chapters();
        let request = request_for(&session, "lamp", 2);
        session.select_search_result(request);
        assert!(session.select_chapter(ChapterId::new(1)));
        assert!(!session.navigator().highlight().is_pending());
        assert_eq!(session.acknowledge_highlight(), None);
    }

    #[test]
    fn test_unknown_selection_keeps_state() {
        let mut session = three_chapters();
        let request = request_for(&session, "lamp", 0);
        session.select_search_result(request.clone());

        assert!(!session.select_chapter(ChapterId::new(42)));
        assert_eq!(session.navigator().highlight().pending(), Some(&request));
        assert_eq!(session.store().current_index(), 1);
    }

    #[test]
    fn test_search_result_for_deleted_chapter_is_ignored() {
        let mut session = three_chapters();
        let request = request_for(&session, "lamp", 2);
        session.delete_chapter(ChapterId::new(3), &AlwaysConfirm);
        assert!(!session.select_search_result(request));
        assert!(!session.navigator().highlight().is_pending());
    }

    #[test]
    fn test_next_previous_clamp_and_flags() {
        let mut session = three_chapters();
        assert!(session.is_first_chapter());
        assert!(!session.previous_chapter());

        assert!(session.next_chapter());
        assert!(session.next_chapter());
        assert!(session.is_last_chapter());
        assert!(!session.next_chapter());
        assert_eq!(session.store().current_index(), 2);

        assert!(session.previous_chapter());
        assert_eq!(session.store().current_index(), 1);
        assert!(!session.is_first_chapter() && !session.is_last_chapter());
    }

    #[test]
    fn test_stepping_clears_highlight_and_scroll() {
        let mut session = three_chapters();
        let request = request_for(&session, "lamp", 0);
        session.select_search_result(request);
        session.update_scroll(60.0);

        assert!(session.next_chapter());
        assert!(!session.navigator().highlight().is_pending());
        assert_eq!(session.scroll(), ScrollFraction::TOP);
    }

    #[test]
    fn test_progress_follows_latest_scroll() {
        let mut session = three_chapters();
        // 4 + 6 + 1 = 11 词
        session.update_scroll(50.0);
        session.update_scroll(100.0);
        let progress = session.progress();
        assert_eq!(progress.total_words, 11);
        assert_eq!(progress.words_read, 4);
        assert_eq!(progress.chapter_progress, 100);
        // 4 / 11 = 36.36% => 36
        assert_eq!(progress.overall_progress, 36);

        session.update_scroll(250.0);
        assert_eq!(session.progress().chapter_progress, 100);
    }

    #[test]
    fn test_delete_current_resets_scroll() {
        let mut session = session_with(&[(1, "a"), (2, "b"), (3, "c")], 2);
        session.update_scroll(80.0);
        session.delete_chapter(ChapterId::new(1), &AlwaysConfirm);
        // 同一章节，滚动保留
        assert_eq!(session.scroll().percentage(), 80.0);

        session.delete_chapter(ChapterId::new(3), &AlwaysConfirm);
        assert_eq!(session.current_chapter().map(Chapter::id), Some(ChapterId::new(2)));
        assert_eq!(session.scroll(), ScrollFraction::TOP);
    }

    #[test]
    fn test_execute_dispatch() {
        let mut session = three_chapters();
        let confirm = NeverConfirm;

        assert_eq!(
            session.execute(ReaderCommand::ToggleBookmark { chapter_id: ChapterId::new(2) }, &confirm),
            CommandOutcome::Bookmark(true)
        );
        assert_eq!(
            session.execute(ReaderCommand::DeleteChapter { chapter_id: ChapterId::new(2) }, &confirm),
            CommandOutcome::Declined
        );
        assert_eq!(session.chapters().len(), 3);

        let ask_once = |chapter: &Chapter| chapter.is_bookmarked();
        assert_eq!(
            session.execute(ReaderCommand::DeleteChapter { chapter_id: ChapterId::new(2) }, &ask_once),
            CommandOutcome::Applied
        );
        assert_eq!(session.chapters().len(), 2);

        assert_eq!(
            session.execute(
                ReaderCommand::SaveChapter(ChapterDraft::new_chapter("Four", "<p>four</p>")),
                &confirm
            ),
            CommandOutcome::Saved(ChapterId::new(4))
        );
        assert_eq!(
            session.execute(ReaderCommand::SelectChapter { chapter_id: ChapterId::new(9) }, &confirm),
            CommandOutcome::Ignored
        );
        assert_eq!(session.execute(ReaderCommand::HighlightApplied, &confirm), CommandOutcome::Ignored);
        assert_eq!(
            session.execute(ReaderCommand::TogglePanel(Panel::Sidebar), &confirm),
            CommandOutcome::Panel { panel: Panel::Sidebar, open: true }
        );
        assert_eq!(
            session.execute(ReaderCommand::ToggleView, &confirm),
            CommandOutcome::View(ViewMode::Overview)
        );
        assert!(!session.navigator().panels().sidebar);
        assert_eq!(
            session.execute(ReaderCommand::TogglePanel(Panel::Status), &confirm),
            CommandOutcome::Ignored
        );
        assert_eq!(
            session.execute(ReaderCommand::NextChapter, &confirm),
            CommandOutcome::Applied
        );
        assert_eq!(session.navigator().view_mode(), ViewMode::Chapter);
    }

    #[test]
    fn test_empty_novel_snapshot() {
        let mut session = session_with(&[(1, "only")], 0);
        session.delete_chapter(ChapterId::new(1), &AlwaysConfirm);

        let snapshot = session.snapshot();
        assert!(snapshot.current_chapter.is_none());
        assert!(snapshot.chapters.is_empty());
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.progress.overall_progress, 0);
        assert!(snapshot.is_first_chapter && snapshot.is_last_chapter);
        assert!(!session.next_chapter());
        assert!(!session.previous_chapter());
        assert!(session.search("anything").is_empty());
    }

    #[test]
    fn test_bookmarks_and_detail() {
        let mut session = three_chapters();
        session.toggle_bookmark(ChapterId::new(3));
        session.toggle_bookmark(ChapterId::new(1));
        let ids: Vec<ChapterId> = session.bookmarks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![ChapterId::new(1), ChapterId::new(3)]);

        let detail = session.chapter_detail(ChapterId::new(3)).unwrap();
        assert_eq!(detail.position, 2);
        assert!(detail.bookmarked);
        assert!(matches!(
            session.chapter_detail(ChapterId::new(8)),
            Err(ApplicationError::NotFound { .. })
        ));
    }

    #[test]
    fn test_overview_is_plain_text() {
        let session = three_chapters();
        let overview = session.overview();
        assert_eq!(overview.len(), 3);
        assert_eq!(overview[1].text, "the lamp burns the lamp fades");
        assert_eq!(overview[1].word_count, 6);
    }
}
