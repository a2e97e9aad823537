//! Query Handlers

mod story_handlers;

pub use story_handlers::{GetStoryHandler, ListStoriesHandler, StorySummary};
