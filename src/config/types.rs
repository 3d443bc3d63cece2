//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::reading::DEFAULT_CONTEXT_CHARS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 阅读器配置
    #[serde(default)]
    pub reader: ReaderConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Sled 数据库路径
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// 仅保存在内存中（进程退出即丢失）
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_db_path() -> String {
    "data/lectern.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            ephemeral: false,
        }
    }
}

/// 阅读器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// 搜索摘要中匹配前后各保留的字符数
    #[serde(default = "default_snippet_context_chars")]
    pub snippet_context_chars: usize,
}

fn default_snippet_context_chars() -> usize {
    DEFAULT_CONTEXT_CHARS
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            snippet_context_chars: default_snippet_context_chars(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
