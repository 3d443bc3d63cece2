//! Lectern - 个人电子书阅读状态引擎
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 小说、章节、书签与笔记
//! - Reading Context: 进度计算、全文搜索、视图与面板导航
//!
//! 应用层 (application/):
//! - Ports: 存储端口、删除确认端口
//! - NovelStore: 持久化的小说与当前章节索引
//! - ReaderSession: 命令执行与状态查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 内存存储
//! - Persistence: Sled 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
