//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{StoryMetadata, StoryRecord, StorySummary};
use crate::domain::story::{SceneSummary, Story};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetStoryRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DeleteStoryRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub id: Uuid,
    pub story: Story,
    pub image_urls: Vec<String>,
    pub audio_urls: Vec<String>,
    pub scenes: Vec<SceneSummary>,
    pub metadata: StoryMetadata,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StoryRecord> for StoryResponse {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id,
            story: record.story,
            image_urls: record.image_urls,
            audio_urls: record.audio_urls,
            scenes: record.scenes,
            metadata: record.metadata,
            is_public: record.is_public,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StorySummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub metadata: StoryMetadata,
    pub scene_count: usize,
    pub image_count: usize,
    pub audio_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<StorySummary> for StorySummaryResponse {
    fn from(summary: StorySummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            metadata: summary.metadata,
            scene_count: summary.scene_count,
            image_count: summary.image_count,
            audio_count: summary.audio_count,
            created_at: summary.created_at,
        }
    }
}

// ============================================================================
// Narration DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PreviewNarrationRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewNarrationResponse {
    pub audio_url: String,
    pub file_name: String,
}
