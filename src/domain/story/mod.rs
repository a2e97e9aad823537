//! Story Context - 故事领域模型

mod aggregate;
mod entities;
mod value_objects;

pub use aggregate::{fallback_plan, Story};
pub use entities::{Scene, ScenePlan, SceneSummary};
pub use value_objects::{ImageStyle, ReadingLevel, StoryLength, VoicePreset};
