//! Lectern - 个人电子书阅读状态引擎
//!
//! 启动流程：加载配置、初始化日志、打开存储、恢复阅读会话、启动 HTTP 服务

use std::sync::Arc;

use lectern::application::{NovelStoragePort, ReaderSession};
use lectern::config::{load_config, print_config, AppConfig};
use lectern::domain::reading::SearchOptions;
use lectern::infrastructure::http::{AppState, HttpServer};
use lectern::infrastructure::{InMemoryNovelStorage, SledNovelStorage, SledStorageConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Lectern - 阅读状态引擎");
    print_config(&config);

    let storage = open_storage(&config)?;
    let search_options = SearchOptions {
        context_chars: config.reader.snippet_context_chars,
    };
    let session = ReaderSession::open(storage, search_options);
    tracing::info!(
        chapters = session.chapters().len(),
        current_index = session.store().current_index(),
        "Reader session restored"
    );

    let server = HttpServer::new(config.server.clone(), AppState::new(session));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},lectern={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 打开存储：内存模式或 Sled
fn open_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn NovelStoragePort>> {
    if config.storage.ephemeral {
        return Ok(InMemoryNovelStorage::new().arc());
    }

    if let Some(parent) = std::path::Path::new(&config.storage.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let sled_config = SledStorageConfig {
        db_path: config.storage.db_path.clone(),
    };
    Ok(SledNovelStorage::new(&sled_config)?.arc())
}
