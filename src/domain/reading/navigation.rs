//! Reading Context - 导航与高亮协调
//!
//! 两个相互独立的状态轴:
//! - 视图模式: 单章阅读 / 全书概览
//! - 高亮指令: 无 / 待执行（一次性）

use serde::{Deserialize, Serialize};

use crate::domain::novel::ChapterId;

/// 视图模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Chapter,
    Overview,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Chapter => "chapter",
            ViewMode::Overview => "overview",
        }
    }
}

/// 章节范围内的面板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Sidebar,
    Status,
    Bookmarks,
}

/// 面板开关状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Panels {
    pub sidebar: bool,
    pub status: bool,
    pub bookmarks: bool,
}

impl Panels {
    fn slot(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::Sidebar => &mut self.sidebar,
            Panel::Status => &mut self.status,
            Panel::Bookmarks => &mut self.bookmarks,
        }
    }

    fn close_all(&mut self) {
        *self = Self::default();
    }
}

/// 高亮请求：章节渲染后滚动到第 result_index 个 search_term 并标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRequest {
    pub chapter_id: ChapterId,
    pub result_index: usize,
    pub search_term: String,
}

/// 一次性高亮指令
///
/// 只能通过 `Navigator::acknowledge_highlight` 消费一次
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Pending(HighlightRequest),
}

impl Highlight {
    pub fn pending(&self) -> Option<&HighlightRequest> {
        match self {
            Highlight::None => None,
            Highlight::Pending(request) => Some(request),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Highlight::Pending(_))
    }
}

/// 导航协调器
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    view_mode: ViewMode,
    panels: Panels,
    highlight: Highlight,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// 切换视图模式
    pub fn toggle_view(&mut self) -> ViewMode {
        let next = match self.view_mode {
            ViewMode::Chapter => ViewMode::Overview,
            ViewMode::Overview => ViewMode::Chapter,
        };
        self.set_view(next);
        next
    }

    /// 设置视图模式；进入概览时关闭所有章节面板
    pub fn set_view(&mut self, mode: ViewMode) {
        if mode == ViewMode::Overview {
            self.panels.close_all();
        }
        self.view_mode = mode;
    }

    /// 切换面板，返回面板新状态；概览模式下忽略
    pub fn toggle_panel(&mut self, panel: Panel) -> Option<bool> {
        if self.view_mode == ViewMode::Overview {
            return None;
        }
        let slot = self.panels.slot(panel);
        *slot = !*slot;
        Some(*slot)
    }

    /// 手动选择章节: 回到单章视图并丢弃待执行的高亮
    pub fn chapter_selected(&mut self) {
        self.view_mode = ViewMode::Chapter;
        self.highlight = Highlight::None;
    }

    /// 上一章/下一章: 高亮指令只对原章节有效，隐式清除
    pub fn chapter_stepped(&mut self) {
        self.chapter_selected();
    }

    /// 选择搜索结果: 回到单章视图并替换待执行的高亮
    pub fn search_result_selected(&mut self, request: HighlightRequest) {
        self.view_mode = ViewMode::Chapter;
        self.highlight = Highlight::Pending(request);
    }

    /// 展示层报告高亮已完成；只有第一次调用会返回请求
    pub fn acknowledge_highlight(&mut self) -> Option<HighlightRequest> {
        match std::mem::take(&mut self.highlight) {
            Highlight::Pending(request) => Some(request),
            Highlight::None => None,
        }
    }
}
