//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod illustrator;
mod media_storage;
mod repositories;
mod speech_engine;
mod story_writer;

pub use illustrator::{
    IllustrationError, IllustrationRequest, IllustrationResponse, IllustratorPort, ReferencePhoto,
};
pub use media_storage::{extension_for, MediaCategory, MediaStorageError, MediaStoragePort};
pub use repositories::{RepositoryError, StoryMetadata, StoryRecord, StoryRepositoryPort};
pub use speech_engine::{
    preset_voice, voices, SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse,
    VoiceSettings,
};
pub use story_writer::{StoryBrief, StoryGenError, StoryWriterPort};
