//! Search HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ApplicationError, NeverConfirm, ReaderCommand};
use crate::domain::reading::{count_occurrences, normalize_query, HighlightRequest, SearchResults};
use crate::infrastructure::http::dto::{
    ApiResponse, CommandResponse, SearchRequest, SelectSearchResultRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::reader::run_command;
use crate::infrastructure::http::state::AppState;

/// 全文搜索
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Json<ApiResponse<SearchResults>> {
    let session = state.session.lock().await;
    let results = session.search(&request.query);
    tracing::debug!(
        query = %results.query,
        total = results.total,
        chapters = results.chapters_matched,
        "Search executed"
    );
    Json(ApiResponse::success(results))
}

/// 选择搜索结果：跳转章节并下发高亮指令
///
/// 章节已不存在时命令本身是空操作；章节存在但没有第 result_index 个匹配时拒绝
pub async fn select_result(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectSearchResultRequest>,
) -> Result<Json<ApiResponse<CommandResponse>>, ApiError> {
    let search_term = normalize_query(&request.search_term);
    if search_term.is_empty() {
        return Err(ApplicationError::validation("search_term cannot be empty").into());
    }

    let occurrences = {
        let session = state.session.lock().await;
        session
            .store()
            .chapter(request.chapter_id)
            .map(|chapter| count_occurrences(chapter, &search_term))
    };
    if let Some(count) = occurrences {
        if request.result_index >= count {
            return Err(ApplicationError::validation(format!(
                "result_index {} out of range, chapter has {} matches",
                request.result_index, count
            ))
            .into());
        }
    }
    let command = ReaderCommand::SelectSearchResult(HighlightRequest {
        chapter_id: request.chapter_id,
        result_index: request.result_index,
        search_term,
    });
    Ok(run_command(&state, command, &NeverConfirm).await)
}
