//! Story Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{StoryMetadata, StoryRecord, StoryRepositoryPort};
use crate::application::queries::{GetStory, ListStories};

/// GetStory Handler
pub struct GetStoryHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl GetStoryHandler {
    pub fn new(story_repo: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { story_repo }
    }

    pub async fn handle(&self, query: GetStory) -> Result<StoryRecord, ApplicationError> {
        self.story_repo
            .find_by_id(query.story_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Story", query.story_id))
    }
}

/// 故事摘要（列表接口用，不携带成稿正文）
#[derive(Debug, Clone)]
pub struct StorySummary {
    pub id: Uuid,
    pub title: String,
    pub metadata: StoryMetadata,
    pub scene_count: usize,
    pub image_count: usize,
    pub audio_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<StoryRecord> for StorySummary {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id,
            title: record.story.title,
            scene_count: record.scenes.len(),
            image_count: record.image_urls.len(),
            audio_count: record.audio_urls.len(),
            metadata: record.metadata,
            created_at: record.created_at,
        }
    }
}

/// ListStories Handler
pub struct ListStoriesHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl ListStoriesHandler {
    pub fn new(story_repo: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { story_repo }
    }

    pub async fn handle(&self, _query: ListStories) -> Result<Vec<StorySummary>, ApplicationError> {
        let records = self.story_repo.list_public().await?;
        Ok(records.into_iter().map(StorySummary::from).collect())
    }
}
