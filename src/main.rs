//! Fabula - 插画与朗读儿童故事生成服务
//!
//! - Domain: story/, narration/ (纯领域逻辑)
//! - Application: commands, queries, ports
//! - Infrastructure: http, adapters, persistence

use std::sync::Arc;

use fabula::config::{load_config, print_config};
use fabula::infrastructure::adapters::{
    ElevenSpeechClient, ElevenSpeechClientConfig, FileMediaStorage, GeminiImageClient,
    GeminiImageClientConfig, GeminiTextClient, GeminiTextClientConfig,
};
use fabula::infrastructure::http::{AppState, HttpServer, ServerConfig};
use fabula::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteStoryRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},fabula={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Fabula - 插画与朗读儿童故事生成服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.media_dir).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let story_repo = Arc::new(SqliteStoryRepository::new(pool.clone()));

    // 创建文案模型客户端
    let story_writer = Arc::new(GeminiTextClient::new(GeminiTextClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        timeout_secs: config.llm.timeout_secs,
    })?);

    // 创建插画客户端（API Key 为空时复用文案模型的）
    let image_api_key = if config.image.api_key.is_empty() {
        config.llm.api_key.clone()
    } else {
        config.image.api_key.clone()
    };
    let illustrator = Arc::new(GeminiImageClient::new(GeminiImageClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: image_api_key,
        model: config.image.model.clone(),
        timeout_secs: config.image.timeout_secs,
    })?);

    // 创建语音合成客户端
    let speech_engine = Arc::new(ElevenSpeechClient::new(ElevenSpeechClientConfig {
        base_url: config.speech.base_url.clone(),
        api_key: config.speech.api_key.clone(),
        model_id: config.speech.model_id.clone(),
        timeout_secs: config.speech.timeout_secs,
        ..Default::default()
    })?);

    // // 离线联调时可用 Fake 客户端整体替换外部服务
    // let story_writer = Arc::new(fabula::infrastructure::adapters::FakeStoryWriter::new());
    // let illustrator = Arc::new(fabula::infrastructure::adapters::FakeIllustrator::new());
    // let speech_engine = Arc::new(fabula::infrastructure::adapters::FakeSpeechClient::new());

    // 创建文件媒体存储
    let media_storage = Arc::new(FileMediaStorage::new(
        config.storage.media_dir.clone(),
        config.server.public_base_url(),
    ));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_media_dir(config.storage.media_dir.clone());
    let state = AppState::new(
        story_writer,
        illustrator,
        speech_engine,
        media_storage,
        story_repo,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
