//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（NovelStorage、Confirmation）
//! - store: 小说状态的唯一写入者
//! - session: 阅读会话，组合存储、导航与滚动状态
//! - commands / queries: 展示层的输入事件与只读视图
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod session;
pub mod store;

// Re-exports
pub use commands::{CommandOutcome, ReaderCommand};
pub use error::ApplicationError;
pub use ports::{AlwaysConfirm, ConfirmationPort, NeverConfirm, NovelStoragePort, StorageError};
pub use queries::{ChapterDetail, ChapterSummary, OverviewChapter, ReaderSnapshot};
pub use session::ReaderSession;
pub use store::{DeleteOutcome, NovelStore};
