//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::story::{SceneSummary, Story};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 生成请求的元信息，与故事一并落库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMetadata {
    pub name: String,
    pub dream: String,
    pub personality: String,
    pub voice_preset: String,
    /// 用户自定义音色（为空表示使用预设兜底音色）
    pub designed_voice_id: Option<String>,
    pub reading_level: String,
    pub story_length: String,
    pub image_style: String,
    pub pace: String,
    pub created_at: DateTime<Utc>,
}

/// 故事实体（用于持久化）
#[derive(Debug, Clone)]
pub struct StoryRecord {
    pub id: Uuid,
    /// 成稿结构化内容
    pub story: Story,
    /// 逐场景插画 URL（与场景一一对应，失败位为占位图）
    pub image_urls: Vec<String>,
    /// 逐 chunk 音频 URL（失败位为空串）
    pub audio_urls: Vec<String>,
    /// 场景摘要
    pub scenes: Vec<SceneSummary>,
    pub metadata: StoryMetadata,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Story Repository Port
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// 保存故事
    async fn save(&self, record: &StoryRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找故事
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoryRecord>, RepositoryError>;

    /// 获取所有公开故事（新→旧）
    async fn list_public(&self) -> Result<Vec<StoryRecord>, RepositoryError>;

    /// 删除故事
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
