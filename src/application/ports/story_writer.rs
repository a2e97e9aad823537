//! Story Writer Port - 故事文案模型抽象
//!
//! 规划（故事弧线）与写作（成稿）两步都由外部 LLM 完成，
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::{ReadingLevel, ScenePlan, Story};

/// 文案模型错误
#[derive(Debug, Error)]
pub enum StoryGenError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    /// 模型输出不是约定的 JSON，调用方可用兜底内容继续
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 一次故事生成的主角设定
#[derive(Debug, Clone)]
pub struct StoryBrief {
    /// 主角名字
    pub name: String,
    /// 梦想/主题
    pub dream: String,
    /// 性格描述
    pub personality: String,
    /// 期望场景数
    pub scene_count: usize,
    /// 目标阅读水平
    pub reading_level: ReadingLevel,
}

/// Story Writer Port
#[async_trait]
pub trait StoryWriterPort: Send + Sync {
    /// 规划故事弧线（每场景: 标题、caption、情节、插画提示）
    async fn plan_scenes(&self, brief: &StoryBrief) -> Result<Vec<ScenePlan>, StoryGenError>;

    /// 按弧线写出成稿（标题、寓意、逐场景正文与情感提示）
    async fn write_story(
        &self,
        brief: &StoryBrief,
        plan: &[ScenePlan],
    ) -> Result<Story, StoryGenError>;
}
