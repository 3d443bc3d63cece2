//! Reading Context - 阅读状态派生与导航
//!
//! - progress: 进度快照（纯函数）
//! - search: 全文搜索（纯函数）
//! - navigation: 视图模式、面板与一次性高亮指令

mod navigation;
mod progress;
mod search;

pub use navigation::{Highlight, HighlightRequest, Navigator, Panel, Panels, ViewMode};
pub use progress::{calculate_progress, ProgressSnapshot};
pub use search::{
    count_occurrences, normalize_query, search_chapters, SearchHit, SearchOptions, SearchResults,
    Snippet, DEFAULT_CONTEXT_CHARS,
};
