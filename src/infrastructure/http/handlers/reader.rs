//! Reader HTTP Handlers
//!
//! 阅读状态、滚动、翻页、视图模式与高亮确认

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    ConfirmationPort, NeverConfirm, OverviewChapter, ReaderCommand, ReaderSnapshot,
};
use crate::domain::reading::ProgressSnapshot;
use crate::infrastructure::http::dto::{
    ApiResponse, CommandResponse, PanelRequest, ScrollRequest, ViewRequest,
};
use crate::infrastructure::http::state::AppState;

/// 执行命令并返回最新状态
pub(crate) async fn run_command(
    state: &AppState,
    command: ReaderCommand,
    confirm: &(dyn ConfirmationPort + Sync),
) -> Json<ApiResponse<CommandResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.execute(command, confirm);
    Json(ApiResponse::success(CommandResponse {
        applied: outcome.applied(),
        outcome,
        state: session.snapshot(),
    }))
}

/// 完整状态快照
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ReaderSnapshot>> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.snapshot()))
}

/// 进度快照
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<ProgressSnapshot>> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.progress()))
}

/// 概览模式内容
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<OverviewChapter>>> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.overview()))
}

/// 上报滚动百分比（超出范围的值限制到 [0, 100]）
pub async fn update_scroll(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScrollRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let command = ReaderCommand::UpdateScroll {
        percentage: request.percentage,
    };
    run_command(&state, command, &NeverConfirm).await
}

pub async fn next_chapter(State(state): State<Arc<AppState>>) -> Json<ApiResponse<CommandResponse>> {
    run_command(&state, ReaderCommand::NextChapter, &NeverConfirm).await
}

pub async fn previous_chapter(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<CommandResponse>> {
    run_command(&state, ReaderCommand::PreviousChapter, &NeverConfirm).await
}

/// 切换或设置视图模式
pub async fn set_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let command = match request.mode {
        Some(mode) => ReaderCommand::SetView(mode),
        None => ReaderCommand::ToggleView,
    };
    run_command(&state, command, &NeverConfirm).await
}

pub async fn toggle_panel(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PanelRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    run_command(&state, ReaderCommand::TogglePanel(request.panel), &NeverConfirm).await
}

/// 展示层报告高亮已完成
pub async fn highlight_applied(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<CommandResponse>> {
    run_command(&state, ReaderCommand::HighlightApplied, &NeverConfirm).await
}
