//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryWriter、Illustrator、SpeechEngine、MediaStorage、Repository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        DeleteStoryHandler, GenerateStoryHandler, GenerateStoryResponse, PreviewNarrationHandler,
        PreviewNarrationResponse,
    },
    DeleteStory, GenerateStory, PreviewNarration,
};

pub use error::ApplicationError;

pub use ports::{
    extension_for, preset_voice, voices, IllustrationError, IllustrationRequest,
    IllustrationResponse, IllustratorPort, MediaCategory, MediaStorageError, MediaStoragePort,
    ReferencePhoto, RepositoryError, SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse,
    StoryBrief, StoryGenError, StoryMetadata, StoryRecord, StoryRepositoryPort, StoryWriterPort,
    VoiceSettings,
};

pub use queries::{
    handlers::{GetStoryHandler, ListStoriesHandler, StorySummary},
    GetStory, ListStories,
};
