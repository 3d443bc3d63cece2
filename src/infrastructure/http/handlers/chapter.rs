//! Chapter HTTP Handlers
//!
//! 章节查询、选择、书签、笔记、保存与删除

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ChapterDetail, ChapterSummary, NeverConfirm, ReaderCommand};
use crate::domain::novel::{Chapter, ChapterDraft};
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterIdRequest, CommandResponse, DeleteChapterRequest, UpdateNoteRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::reader::run_command;
use crate::infrastructure::http::state::AppState;

/// 章节列表
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ChapterSummary>>> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.chapter_summaries()))
}

/// 章节详情
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChapterIdRequest>,
) -> Result<Json<ApiResponse<ChapterDetail>>, ApiError> {
    let session = state.session.lock().await;
    let detail = session.chapter_detail(request.id)?;
    Ok(Json(ApiResponse::success(detail)))
}

/// 已加书签的章节
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ChapterSummary>>> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.bookmarks()))
}

pub async fn select_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChapterIdRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let command = ReaderCommand::SelectChapter {
        chapter_id: request.id,
    };
    run_command(&state, command, &NeverConfirm).await
}

pub async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChapterIdRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let command = ReaderCommand::ToggleBookmark {
        chapter_id: request.id,
    };
    run_command(&state, command, &NeverConfirm).await
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateNoteRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let command = ReaderCommand::UpdateNote {
        chapter_id: request.id,
        notes: request.notes,
    };
    run_command(&state, command, &NeverConfirm).await
}

/// 新建（不带 id）或编辑章节
pub async fn save_chapter(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ChapterDraft>,
) -> Json<ApiResponse<CommandResponse>> {
    run_command(&state, ReaderCommand::SaveChapter(draft), &NeverConfirm).await
}

/// 删除章节
///
/// 展示层完成确认对话后以 `confirm: true` 调用；未确认时不删除
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteChapterRequest>,
) -> Json<ApiResponse<CommandResponse>> {
    let confirmed = request.confirm;
    let confirm = move |_: &Chapter| confirmed;
    let command = ReaderCommand::DeleteChapter {
        chapter_id: request.id,
    };
    run_command(&state, command, &confirm).await
}
