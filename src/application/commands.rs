//! Reader Commands - 展示层发来的事件
//!
//! 每个命令对应一次离散的用户操作

use serde::Serialize;

use crate::domain::novel::{ChapterDraft, ChapterId};
use crate::domain::reading::{HighlightRequest, Panel, ViewMode};

/// 阅读器命令
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderCommand {
    SelectChapter { chapter_id: ChapterId },
    SelectSearchResult(HighlightRequest),
    NextChapter,
    PreviousChapter,
    ToggleBookmark { chapter_id: ChapterId },
    UpdateNote { chapter_id: ChapterId, notes: String },
    SaveChapter(ChapterDraft),
    /// 需要确认
    DeleteChapter { chapter_id: ChapterId },
    UpdateScroll { percentage: f64 },
    HighlightApplied,
    ToggleView,
    SetView(ViewMode),
    TogglePanel(Panel),
}

impl ReaderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ReaderCommand::SelectChapter { .. } => "select_chapter",
            ReaderCommand::SelectSearchResult(_) => "select_search_result",
            ReaderCommand::NextChapter => "next_chapter",
            ReaderCommand::PreviousChapter => "previous_chapter",
            ReaderCommand::ToggleBookmark { .. } => "toggle_bookmark",
            ReaderCommand::UpdateNote { .. } => "update_note",
            ReaderCommand::SaveChapter(_) => "save_chapter",
            ReaderCommand::DeleteChapter { .. } => "delete_chapter",
            ReaderCommand::UpdateScroll { .. } => "update_scroll",
            ReaderCommand::HighlightApplied => "highlight_applied",
            ReaderCommand::ToggleView => "toggle_view",
            ReaderCommand::SetView(_) => "set_view",
            ReaderCommand::TogglePanel(_) => "toggle_panel",
        }
    }
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// 已生效
    Applied,
    /// 引用不存在、已在边界或当前模式下不适用，静默忽略
    Ignored,
    /// 用户取消了不可逆操作
    Declined,
    /// 章节已保存
    Saved(ChapterId),
    /// 书签新状态
    Bookmark(bool),
    /// 面板新状态
    Panel { panel: Panel, open: bool },
    /// 当前视图模式
    View(ViewMode),
    /// 被消费的高亮请求
    HighlightConsumed(HighlightRequest),
}

impl CommandOutcome {
    /// 命令是否改变了状态
    pub fn applied(&self) -> bool {
        !matches!(self, CommandOutcome::Ignored | CommandOutcome::Declined)
    }
}
