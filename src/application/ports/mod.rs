//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层、展示层之间的抽象接口

mod confirmation;
mod novel_storage;

pub use confirmation::{AlwaysConfirm, ConfirmationPort, NeverConfirm};
pub use novel_storage::{NovelStoragePort, StorageError};
