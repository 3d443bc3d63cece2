//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CommandOutcome, ReaderSnapshot};
use crate::domain::novel::ChapterId;
use crate::domain::reading::{Panel, ViewMode};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 命令执行后的响应：结果 + 最新状态
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub applied: bool,
    pub outcome: CommandOutcome,
    pub state: ReaderSnapshot,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChapterIdRequest {
    pub id: ChapterId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub id: ChapterId,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub id: ChapterId,
    /// 用户是否已确认删除
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScrollRequest {
    pub percentage: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewRequest {
    /// 为空时在两种模式之间切换
    #[serde(default)]
    pub mode: Option<ViewMode>,
}

#[derive(Debug, Deserialize)]
pub struct PanelRequest {
    pub panel: Panel,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectSearchResultRequest {
    pub chapter_id: ChapterId,
    pub result_index: usize,
    pub search_term: String,
}
