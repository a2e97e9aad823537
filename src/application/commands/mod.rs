//! Application Commands - CQRS 命令

pub mod handlers;
mod story_commands;

pub use story_commands::{DeleteStory, GenerateStory, PreviewNarration};
