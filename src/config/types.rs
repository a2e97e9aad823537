//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文案模型配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 插画模型配置
    #[serde(default)]
    pub image: ImageConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

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

    /// 公开访问的 Base URL（媒体 URL 以它为前缀）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 文案模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// 模型名
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// 插画模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// API Key，为空时复用 llm.api_key
    #[serde(default)]
    pub api_key: String,

    /// 模型名
    #[serde(default = "default_image_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

fn default_image_timeout() -> u64 {
    180
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_image_model(),
            timeout_secs: default_image_timeout(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 合成服务基础 URL
    #[serde(default = "default_speech_base_url")]
    pub base_url: String,

    /// 模型 ID
    #[serde(default = "default_speech_model")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

fn default_speech_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_speech_model() -> String {
    "eleven_v3".to_string()
}

fn default_speech_timeout() -> u64 {
    120
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_speech_base_url(),
            model_id: default_speech_model(),
            timeout_secs: default_speech_timeout(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/fabula.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成产物存储目录
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("data/media")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.speech.model_id, "eleven_v3");
        assert_eq!(config.database.path, "data/fabula.db");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5080");
    }

    #[test]
    fn test_public_base_url_falls_back_to_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:5080");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/fabula.db?mode=rwc");
    }
}
