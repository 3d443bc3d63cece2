//! Application State
//!
//! 阅读会话只有一个持有者；HTTP 处理器通过互斥锁串行访问

use tokio::sync::Mutex;

use crate::application::ReaderSession;

/// 应用状态
pub struct AppState {
    pub session: Mutex<ReaderSession>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(session: ReaderSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}
