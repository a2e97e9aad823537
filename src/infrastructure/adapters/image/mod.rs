//! Image Adapter - 插画生成客户端实现

mod fake_illustrator;
mod gemini_image_client;

pub use fake_illustrator::FakeIllustrator;
pub use gemini_image_client::{GeminiImageClient, GeminiImageClientConfig};
