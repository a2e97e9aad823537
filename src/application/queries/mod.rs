//! Application Queries - CQRS 查询

pub mod handlers;
mod story_queries;

pub use story_queries::{GetStory, ListStories};
