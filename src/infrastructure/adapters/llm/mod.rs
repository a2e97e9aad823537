//! LLM Adapter - 文案模型客户端实现

mod fake_story_writer;
mod gemini_text_client;
mod json;
mod prompts;

pub use fake_story_writer::FakeStoryWriter;
pub use gemini_text_client::{GeminiTextClient, GeminiTextClientConfig};
