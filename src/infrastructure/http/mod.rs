//! HTTP Layer - RESTful API
//!
//! 展示层通过 JSON 接口驱动阅读会话

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
