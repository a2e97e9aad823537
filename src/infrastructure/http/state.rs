//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteStoryHandler, GenerateStoryHandler, PreviewNarrationHandler,
    // Query handlers
    GetStoryHandler, ListStoriesHandler,
    // Ports
    IllustratorPort, MediaStoragePort, SpeechEnginePort, StoryRepositoryPort, StoryWriterPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub story_writer: Arc<dyn StoryWriterPort>,
    pub illustrator: Arc<dyn IllustratorPort>,
    pub speech_engine: Arc<dyn SpeechEnginePort>,
    pub media_storage: Arc<dyn MediaStoragePort>,
    pub story_repo: Arc<dyn StoryRepositoryPort>,

    // ========== Command Handlers ==========
    pub generate_story_handler: GenerateStoryHandler,
    pub delete_story_handler: DeleteStoryHandler,
    pub preview_narration_handler: PreviewNarrationHandler,

    // ========== Query Handlers ==========
    pub get_story_handler: GetStoryHandler,
    pub list_stories_handler: ListStoriesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        story_writer: Arc<dyn StoryWriterPort>,
        illustrator: Arc<dyn IllustratorPort>,
        speech_engine: Arc<dyn SpeechEnginePort>,
        media_storage: Arc<dyn MediaStoragePort>,
        story_repo: Arc<dyn StoryRepositoryPort>,
    ) -> Self {
        Self {
            // Command handlers
            generate_story_handler: GenerateStoryHandler::new(
                story_writer.clone(),
                illustrator.clone(),
                speech_engine.clone(),
                media_storage.clone(),
                story_repo.clone(),
            ),
            delete_story_handler: DeleteStoryHandler::new(story_repo.clone()),
            preview_narration_handler: PreviewNarrationHandler::new(
                speech_engine.clone(),
                media_storage.clone(),
            ),

            // Query handlers
            get_story_handler: GetStoryHandler::new(story_repo.clone()),
            list_stories_handler: ListStoriesHandler::new(story_repo.clone()),

            // Ports
            story_writer,
            illustrator,
            speech_engine,
            media_storage,
            story_repo,
        }
    }
}
