//! Fabula - 插画与朗读儿童故事生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事领域模型（场景、成稿、请求档位）
//! - Narration: 叙述脚本装配核心（标签引擎、脚本装配、chunk 切分）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StoryWriter, Illustrator, SpeechEngine, MediaStorage, Repository）
//! - Commands: CQRS 命令处理器（生成管线、删除、试听）
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 媒体静态服务
//! - Adapters: LLM / 图像 / 语音客户端、文件媒体存储
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
