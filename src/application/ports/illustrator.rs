//! Illustrator Port - 插画生成抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::{ImageStyle, ScenePlan};

/// 插画生成错误
#[derive(Debug, Error)]
pub enum IllustrationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 参考照片（可选，用于保持主角形象一致）
#[derive(Clone)]
pub struct ReferencePhoto {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ReferencePhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferencePhoto")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// 单场景插画请求
#[derive(Debug, Clone)]
pub struct IllustrationRequest {
    /// 主角名字（跨场景形象一致性提示）
    pub hero_name: String,
    /// 场景 caption（氛围提示）
    pub caption: String,
    /// planner 给出的画面描述
    pub scene_prompt: String,
    /// 插画风格
    pub style: ImageStyle,
    /// 参考照片
    pub reference_photo: Option<ReferencePhoto>,
}

impl IllustrationRequest {
    pub fn for_plan(
        plan: &ScenePlan,
        hero_name: &str,
        style: ImageStyle,
        reference_photo: Option<ReferencePhoto>,
    ) -> Self {
        Self {
            hero_name: hero_name.to_string(),
            caption: plan.caption.clone(),
            scene_prompt: plan.illustration_prompt.clone(),
            style,
            reference_photo,
        }
    }
}

/// 插画生成响应
#[derive(Debug, Clone)]
pub struct IllustrationResponse {
    /// 图像原始数据
    pub image_data: Vec<u8>,
    /// MIME 类型（决定存储扩展名）
    pub mime_type: String,
}

/// Illustrator Port
#[async_trait]
pub trait IllustratorPort: Send + Sync {
    /// 为一个场景生成插画
    async fn illustrate(
        &self,
        request: &IllustrationRequest,
    ) -> Result<IllustrationResponse, IllustrationError>;
}
