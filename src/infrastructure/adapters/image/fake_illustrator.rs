//! Fake Illustrator - 用于测试的插画客户端
//!
//! 始终返回固定的 1x1 PNG，不实际调用图像服务

use async_trait::async_trait;

use crate::application::ports::{
    IllustrationError, IllustrationRequest, IllustrationResponse, IllustratorPort,
};

/// 1x1 透明 PNG
const FAKE_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Fake Illustrator
pub struct FakeIllustrator;

impl FakeIllustrator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeIllustrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IllustratorPort for FakeIllustrator {
    async fn illustrate(
        &self,
        request: &IllustrationRequest,
    ) -> Result<IllustrationResponse, IllustrationError> {
        tracing::debug!(
            caption = %request.caption,
            "FakeIllustrator: returning fixed PNG"
        );

        Ok(IllustrationResponse {
            image_data: FAKE_PNG.to_vec(),
            mime_type: "image/png".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::ImageStyle;

    #[tokio::test]
    async fn test_returns_png() {
        let illustrator = FakeIllustrator::new();
        let response = illustrator
            .illustrate(&IllustrationRequest {
                hero_name: "Mira".to_string(),
                caption: "c".to_string(),
                scene_prompt: "p".to_string(),
                style: ImageStyle::Storybook,
                reference_photo: None,
            })
            .await
            .unwrap();

        assert_eq!(response.mime_type, "image/png");
        assert_eq!(&response.image_data[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }
}
