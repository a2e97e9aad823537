//! Command Handlers

mod narration_handlers;
mod story_handlers;

pub use narration_handlers::{PreviewNarrationHandler, PreviewNarrationResponse};
pub use story_handlers::{DeleteStoryHandler, GenerateStoryHandler, GenerateStoryResponse};
