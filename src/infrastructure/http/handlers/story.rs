//! Story HTTP Handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{DeleteStory, GenerateStory, GetStory, ListStories};
use crate::application::ports::ReferencePhoto;
use crate::domain::narration::Pace;
use crate::domain::story::{ImageStyle, ReadingLevel, Story, StoryLength, VoicePreset};
use crate::infrastructure::http::dto::{
    ApiResponse, DeleteStoryRequest, Empty, GetStoryRequest, StoryResponse, StorySummaryResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

/// 生成响应
#[derive(Debug, Serialize)]
pub struct GeneratedStoryResponse {
    pub story_id: Uuid,
    pub story: Story,
    pub image_urls: Vec<String>,
    pub audio_urls: Vec<String>,
}

/// 从 multipart 表单收集的生成参数
#[derive(Debug, Default)]
struct GenerateStoryForm {
    name: String,
    dream: String,
    personality: String,
    voice_preset: Option<String>,
    voice_id: Option<String>,
    reading_level: Option<String>,
    story_length: Option<String>,
    image_style: Option<String>,
    pace: Option<String>,
    is_public: bool,
    photo: Option<ReferencePhoto>,
}

impl GenerateStoryForm {
    /// 枚举字段缺省或取值未知时回落默认档位
    fn into_command(self) -> GenerateStory {
        GenerateStory {
            name: self.name,
            dream: self.dream,
            personality: self.personality,
            voice_preset: self
                .voice_preset
                .as_deref()
                .and_then(VoicePreset::from_str)
                .unwrap_or_default(),
            designed_voice_id: self.voice_id.filter(|id| !id.is_empty()),
            reading_level: self
                .reading_level
                .as_deref()
                .and_then(ReadingLevel::from_str)
                .unwrap_or_default(),
            story_length: self
                .story_length
                .as_deref()
                .and_then(StoryLength::from_str)
                .unwrap_or_default(),
            image_style: self
                .image_style
                .as_deref()
                .and_then(ImageStyle::from_str)
                .unwrap_or_default(),
            pace: self
                .pace
                .as_deref()
                .and_then(Pace::from_str)
                .unwrap_or_default(),
            is_public: self.is_public,
            reference_photo: self.photo,
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<GenerateStoryForm, ApiError> {
    let mut form = GenerateStoryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "photo" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read photo: {}", e)))?;

                if !bytes.is_empty() {
                    form.photo = Some(ReferencePhoto {
                        mime_type,
                        data: bytes.to_vec(),
                    });
                }
            }
            _ => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read field {}: {}", field_name, e))
                })?;

                match field_name.as_str() {
                    "name" => form.name = value,
                    "dream" => form.dream = value,
                    "personality" => form.personality = value,
                    "voice_preset" => form.voice_preset = Some(value),
                    "voice_id" => form.voice_id = Some(value),
                    "reading_level" => form.reading_level = Some(value),
                    "story_length" => form.story_length = Some(value),
                    "image_style" => form.image_style = Some(value),
                    "pace" => form.pace = Some(value),
                    "is_public" => form.is_public = value == "true",
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

// ============================================================================
// Handlers
// ============================================================================

/// 生成故事（同步执行整条管线，响应即最终结果）
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<GeneratedStoryResponse>>, ApiError> {
    let form = read_form(multipart).await?;
    let command = form.into_command();

    tracing::info!(
        name = %command.name,
        dream = %command.dream,
        preset = command.voice_preset.as_str(),
        length = command.story_length.as_str(),
        "Story generation requested"
    );

    let result = state.generate_story_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(GeneratedStoryResponse {
        story_id: result.id,
        story: result.story,
        image_urls: result.image_urls,
        audio_urls: result.audio_urls,
    })))
}

/// 获取故事详情
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetStoryRequest>,
) -> Result<Json<ApiResponse<StoryResponse>>, ApiError> {
    let record = state
        .get_story_handler
        .handle(GetStory { story_id: req.id })
        .await?;

    Ok(Json(ApiResponse::success(StoryResponse::from(record))))
}

/// 获取公开故事列表
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<StorySummaryResponse>>>, ApiError> {
    let summaries = state.list_stories_handler.handle(ListStories).await?;

    Ok(Json(ApiResponse::success(
        summaries.into_iter().map(StorySummaryResponse::from).collect(),
    )))
}

/// 删除故事
pub async fn delete_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteStoryRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_story_handler
        .handle(DeleteStory { story_id: req.id })
        .await?;

    Ok(Json(ApiResponse::<Empty>::ok()))
}
