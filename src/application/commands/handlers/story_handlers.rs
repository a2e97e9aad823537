//! Story Command Handlers
//!
//! GenerateStoryHandler 串起整条生成管线。外部调用失败的处理
//! 原则: 文案解析失败走兜底内容；单张插画或单个音频 chunk 失败
//! 只产生占位结果，不中断整批。

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::commands::{DeleteStory, GenerateStory};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    extension_for, preset_voice, IllustrationRequest, IllustratorPort, MediaCategory,
    MediaStoragePort, SpeechEnginePort, SpeechRequest, StoryBrief, StoryGenError, StoryMetadata,
    StoryRecord, StoryRepositoryPort, StoryWriterPort, VoiceSettings,
};
use crate::domain::narration::{build_script, split_into_chunks, CHUNK_CHAR_BUDGET};
use crate::domain::story::{fallback_plan, ScenePlan, Story};

/// chunk 逐个提交之间的间隔，避免触发合成服务限流
const CHUNK_SUBMIT_DELAY_MS: u64 = 100;

/// 插画失败时的占位图
const PLACEHOLDER_IMAGE_URL: &str = "/placeholder-image.svg";

/// 表现力档位默认值（简化的前端不再暴露这三个旋钮）
const DEFAULT_ENERGY: u8 = 70;
const DEFAULT_LOUDNESS: u8 = 80;
const DEFAULT_GUIDANCE: u8 = 35;

// ============================================================================
// GenerateStory
// ============================================================================

/// 生成响应
#[derive(Debug, Clone)]
pub struct GenerateStoryResponse {
    pub id: Uuid,
    pub story: Story,
    pub image_urls: Vec<String>,
    pub audio_urls: Vec<String>,
}

/// GenerateStory Handler - 整条生成管线
pub struct GenerateStoryHandler {
    story_writer: Arc<dyn StoryWriterPort>,
    illustrator: Arc<dyn IllustratorPort>,
    speech_engine: Arc<dyn SpeechEnginePort>,
    media_storage: Arc<dyn MediaStoragePort>,
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl GenerateStoryHandler {
    pub fn new(
        story_writer: Arc<dyn StoryWriterPort>,
        illustrator: Arc<dyn IllustratorPort>,
        speech_engine: Arc<dyn SpeechEnginePort>,
        media_storage: Arc<dyn MediaStoragePort>,
        story_repo: Arc<dyn StoryRepositoryPort>,
    ) -> Self {
        Self {
            story_writer,
            illustrator,
            speech_engine,
            media_storage,
            story_repo,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStory,
    ) -> Result<GenerateStoryResponse, ApplicationError> {
        let name = command.name.trim().to_string();
        let dream = command.dream.trim().to_string();
        let personality = command.personality.trim().to_string();

        if name.is_empty() || dream.is_empty() || personality.is_empty() {
            return Err(ApplicationError::validation(
                "name, dream and personality are required",
            ));
        }

        let brief = StoryBrief {
            name: name.clone(),
            dream: dream.clone(),
            personality: personality.clone(),
            scene_count: command.story_length.scene_count(),
            reading_level: command.reading_level,
        };

        // 1) 规划故事弧线
        let plan = self.plan_scenes(&brief).await?;

        // 2) 写出成稿
        let story = self.write_story(&brief, &plan).await?;

        // 3) 逐场景插画
        let image_urls = self.illustrate_scenes(&command, &brief, &plan).await;

        // 4) 叙述脚本 + 逐 chunk 合成
        let audio_urls = self.narrate_story(&command, &story).await;

        // 5) 落库
        let story_id = Uuid::new_v4();
        let now = Utc::now();
        let record = StoryRecord {
            id: story_id,
            story: story.clone(),
            image_urls: image_urls.clone(),
            audio_urls: audio_urls.clone(),
            scenes: story.scene_summaries(),
            metadata: StoryMetadata {
                name,
                dream,
                personality,
                voice_preset: command.voice_preset.as_str().to_string(),
                designed_voice_id: command.designed_voice_id.clone(),
                reading_level: command.reading_level.as_str().to_string(),
                story_length: command.story_length.as_str().to_string(),
                image_style: command.image_style.as_str().to_string(),
                pace: command.pace.as_str().to_string(),
                created_at: now,
            },
            is_public: command.is_public,
            created_at: now,
            updated_at: now,
        };

        self.story_repo.save(&record).await?;

        tracing::info!(
            story_id = %story_id,
            title = %story.title,
            scenes = story.scenes.len(),
            images = image_urls.len(),
            audio_chunks = audio_urls.len(),
            "Story generated"
        );

        Ok(GenerateStoryResponse {
            id: story_id,
            story,
            image_urls,
            audio_urls,
        })
    }

    /// 规划；模型输出不可解析时用兜底弧线
    async fn plan_scenes(&self, brief: &StoryBrief) -> Result<Vec<ScenePlan>, ApplicationError> {
        match self.story_writer.plan_scenes(brief).await {
            Ok(plan) if !plan.is_empty() => Ok(plan),
            Ok(_) => {
                tracing::warn!("Planner returned no scenes, using fallback plan");
                Ok(fallback_plan(&brief.name, &brief.dream, brief.scene_count))
            }
            Err(StoryGenError::InvalidResponse(e)) => {
                tracing::warn!(error = %e, "Planner output unparseable, using fallback plan");
                Ok(fallback_plan(&brief.name, &brief.dream, brief.scene_count))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 写作；模型输出不可解析时从弧线兜底成稿
    async fn write_story(
        &self,
        brief: &StoryBrief,
        plan: &[ScenePlan],
    ) -> Result<Story, ApplicationError> {
        match self.story_writer.write_story(brief, plan).await {
            Ok(story) if !story.scenes.is_empty() => Ok(story),
            Ok(_) => {
                tracing::warn!("Writer returned no scenes, using fallback story");
                Ok(Story::fallback_from_plan(&brief.name, &brief.dream, plan))
            }
            Err(StoryGenError::InvalidResponse(e)) => {
                tracing::warn!(error = %e, "Writer output unparseable, using fallback story");
                Ok(Story::fallback_from_plan(&brief.name, &brief.dream, plan))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 逐场景生成并保存插画；失败位给占位图，继续后续场景
    async fn illustrate_scenes(
        &self,
        command: &GenerateStory,
        brief: &StoryBrief,
        plan: &[ScenePlan],
    ) -> Vec<String> {
        let mut image_urls = Vec::with_capacity(plan.len());

        for (index, scene_plan) in plan.iter().enumerate() {
            let request = IllustrationRequest::for_plan(
                scene_plan,
                &brief.name,
                command.image_style,
                command.reference_photo.clone(),
            );

            let url = match self.illustrator.illustrate(&request).await {
                Ok(response) => {
                    let file_name = format!(
                        "{}_{}.{}",
                        Uuid::new_v4(),
                        index,
                        extension_for(&response.mime_type)
                    );
                    match self
                        .media_storage
                        .put(
                            &response.image_data,
                            &file_name,
                            &response.mime_type,
                            MediaCategory::Images,
                        )
                        .await
                    {
                        Ok(url) => url,
                        Err(e) => {
                            tracing::warn!(scene = index, error = %e, "Image upload failed");
                            PLACEHOLDER_IMAGE_URL.to_string()
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(scene = index, error = %e, "Image generation failed");
                    PLACEHOLDER_IMAGE_URL.to_string()
                }
            };

            image_urls.push(url);
        }

        image_urls
    }

    /// 装配叙述脚本并逐 chunk 合成；失败位为空串，不中断整批
    async fn narrate_story(&self, command: &GenerateStory, story: &Story) -> Vec<String> {
        let mode = command.voice_preset.narration_mode();
        let lines = build_script(&story.scenes, mode, command.pace);
        let chunks = split_into_chunks(&lines);

        tracing::debug!(
            mode = mode.as_str(),
            lines = lines.len(),
            chunks = chunks.len(),
            "Narration script built"
        );

        let voice_id = command
            .designed_voice_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| preset_voice(command.voice_preset).to_string());

        let settings = VoiceSettings::from_knobs(DEFAULT_ENERGY, DEFAULT_LOUDNESS, DEFAULT_GUIDANCE);

        let mut audio_urls = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            // 顺序提交并保持 chunk → 场景的一一对应
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(CHUNK_SUBMIT_DELAY_MS)).await;
            }

            if chunk.chars().count() > CHUNK_CHAR_BUDGET {
                tracing::warn!(
                    chunk = index,
                    chars = chunk.chars().count(),
                    "Chunk exceeds synthesis budget, submitting anyway"
                );
            }

            let request = SpeechRequest {
                text: chunk.clone(),
                voice_id: voice_id.clone(),
                settings,
            };

            let url = match self.speech_engine.synthesize(request).await {
                Ok(response) => {
                    let file_name = format!("audio_{}.mp3", Uuid::new_v4());
                    match self
                        .media_storage
                        .put(
                            &response.audio_data,
                            &file_name,
                            &response.content_type,
                            MediaCategory::Audio,
                        )
                        .await
                    {
                        Ok(url) => url,
                        Err(e) => {
                            tracing::warn!(chunk = index, error = %e, "Audio upload failed");
                            String::new()
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        chunk = index,
                        total = chunks.len(),
                        error = %e,
                        "Chunk synthesis failed"
                    );
                    String::new()
                }
            };

            audio_urls.push(url);
        }

        audio_urls
    }
}

// ============================================================================
// DeleteStory
// ============================================================================

/// DeleteStory Handler
pub struct DeleteStoryHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl DeleteStoryHandler {
    pub fn new(story_repo: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { story_repo }
    }

    pub async fn handle(&self, command: DeleteStory) -> Result<(), ApplicationError> {
        let story_id = command.story_id;

        let record = self
            .story_repo
            .find_by_id(story_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Story", story_id))?;

        self.story_repo.delete(story_id).await?;

        tracing::info!(
            story_id = %story_id,
            title = %record.story.title,
            "Story deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RepositoryError;
    use crate::domain::narration::Pace;
    use crate::domain::story::{ImageStyle, ReadingLevel, StoryLength, VoicePreset};
    use crate::infrastructure::adapters::{
        FakeIllustrator, FakeSpeechClient, FakeStoryWriter, FileMediaStorage,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// 内存仓储，仅测试用
    #[derive(Default)]
    struct InMemoryStoryRepository {
        records: Mutex<HashMap<Uuid, StoryRecord>>,
    }

    #[async_trait]
    impl StoryRepositoryPort for InMemoryStoryRepository {
        async fn save(&self, record: &StoryRecord) -> Result<(), RepositoryError> {
            self.records.lock().await.insert(record.id, record.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<StoryRecord>, RepositoryError> {
            Ok(self.records.lock().await.get(&id).cloned())
        }

        async fn list_public(&self) -> Result<Vec<StoryRecord>, RepositoryError> {
            let mut records: Vec<StoryRecord> = self
                .records
                .lock()
                .await
                .values()
                .filter(|r| r.is_public)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(records)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.records.lock().await.remove(&id);
            Ok(())
        }
    }

    fn command() -> GenerateStory {
        GenerateStory {
            name: "Mira".to_string(),
            dream: "firefighter".to_string(),
            personality: "brave and kind".to_string(),
            voice_preset: VoicePreset::WarmNarrator,
            designed_voice_id: None,
            reading_level: ReadingLevel::Primary,
            story_length: StoryLength::Short,
            image_style: ImageStyle::Storybook,
            pace: Pace::Normal,
            is_public: true,
            reference_photo: None,
        }
    }

    fn handler(
        repo: Arc<InMemoryStoryRepository>,
        media_dir: &std::path::Path,
    ) -> GenerateStoryHandler {
        let media = Arc::new(FileMediaStorage::new(
            media_dir.to_path_buf(),
            "http://localhost:5080".to_string(),
        ));
        GenerateStoryHandler::new(
            Arc::new(FakeStoryWriter::new()),
            Arc::new(FakeIllustrator::new()),
            Arc::new(FakeSpeechClient::new()),
            media,
            repo,
        )
    }

    #[tokio::test]
    async fn test_generate_story_persists_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(InMemoryStoryRepository::default());
        let handler = handler(repo.clone(), dir.path());

        let response = handler.handle(command()).await.unwrap();

        assert_eq!(response.story.scenes.len(), 4);
        assert_eq!(response.image_urls.len(), 4);
        // 一场景一 chunk
        assert_eq!(response.audio_urls.len(), 4);
        assert!(response.audio_urls.iter().all(|u| !u.is_empty()));

        let stored = repo.find_by_id(response.id).await.unwrap().unwrap();
        assert!(stored.is_public);
        assert_eq!(stored.scenes.len(), 4);
        assert_eq!(stored.metadata.name, "Mira");
    }

    #[tokio::test]
    async fn test_generate_story_rejects_blank_input() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(InMemoryStoryRepository::default());
        let handler = handler(repo, dir.path());

        let mut cmd = command();
        cmd.dream = "   ".to_string();

        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_failed_synthesis_leaves_placeholder_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(InMemoryStoryRepository::default());
        let media = Arc::new(FileMediaStorage::new(
            dir.path().to_path_buf(),
            "http://localhost:5080".to_string(),
        ));
        // 第 2 个 chunk 合成失败
        let handler = GenerateStoryHandler::new(
            Arc::new(FakeStoryWriter::new()),
            Arc::new(FakeIllustrator::new()),
            Arc::new(FakeSpeechClient::failing_at(1)),
            media,
            repo,
        );

        let response = handler.handle(command()).await.unwrap();

        assert_eq!(response.audio_urls.len(), 4);
        assert!(!response.audio_urls[0].is_empty());
        assert!(response.audio_urls[1].is_empty());
        assert!(!response.audio_urls[2].is_empty());
    }

    #[tokio::test]
    async fn test_delete_story_requires_existing_record() {
        let repo = Arc::new(InMemoryStoryRepository::default());
        let handler = DeleteStoryHandler::new(repo);

        let err = handler
            .handle(DeleteStory {
                story_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
