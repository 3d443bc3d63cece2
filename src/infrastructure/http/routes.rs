//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查
//! - /api/reader/state             GET   完整阅读状态
//! - /api/reader/progress          GET   阅读进度
//! - /api/reader/overview          GET   概览模式内容
//! - /api/reader/scroll            POST  上报滚动百分比
//! - /api/reader/next              POST  下一章
//! - /api/reader/prev              POST  上一章
//! - /api/reader/view              POST  切换/设置视图模式
//! - /api/reader/panel             POST  切换面板
//! - /api/reader/highlight/applied POST  确认高亮已应用
//! - /api/chapter/list             GET   章节列表
//! - /api/chapter/get              POST  章节详情
//! - /api/chapter/select           POST  选择章节
//! - /api/chapter/bookmark         POST  切换书签
//! - /api/chapter/note             POST  更新笔记
//! - /api/chapter/save             POST  新建/编辑章节
//! - /api/chapter/delete           POST  删除章节
//! - /api/bookmarks                GET   书签列表
//! - /api/search                   POST  全文搜索
//! - /api/search/select            POST  选择搜索结果

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/bookmarks", get(handlers::list_bookmarks))
        .route("/search", post(handlers::search))
        .route("/search/select", post(handlers::select_result))
        .nest("/reader", reader_routes())
        .nest("/chapter", chapter_routes())
}

/// Reader 路由
fn reader_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/progress", get(handlers::get_progress))
        .route("/overview", get(handlers::get_overview))
        .route("/scroll", post(handlers::update_scroll))
        .route("/next", post(handlers::next_chapter))
        .route("/prev", post(handlers::previous_chapter))
        .route("/view", post(handlers::set_view))
        .route("/panel", post(handlers::toggle_panel))
        .route("/highlight/applied", post(handlers::highlight_applied))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_chapters))
        .route("/get", post(handlers::get_chapter))
        .route("/select", post(handlers::select_chapter))
        .route("/bookmark", post(handlers::toggle_bookmark))
        .route("/note", post(handlers::update_note))
        .route("/save", post(handlers::save_chapter))
        .route("/delete", post(handlers::delete_chapter))
}
