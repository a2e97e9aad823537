//! Gemini Image Client - 调用外部图像生成接口
//!
//! 实现 IllustratorPort trait。请求携带可选的参考照片
//! （inline base64）与画面描述文本，响应取首个 inlineData 解码。

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    IllustrationError, IllustrationRequest, IllustrationResponse, IllustratorPort,
};
use crate::domain::story::ImageStyle;

/// Gemini 图像客户端配置
#[derive(Debug, Clone)]
pub struct GeminiImageClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiImageClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash-image-preview".to_string(),
            timeout_secs: 180,
        }
    }
}

impl GeminiImageClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// generateContent 线上格式（图像模态）
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

/// part 为 {"text": ...} 或 {"inlineData": ...} 两种形态之一
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    /// base64 编码的图像数据
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

/// 插画风格对应的提示词片段
fn style_text(style: ImageStyle) -> &'static str {
    match style {
        ImageStyle::Watercolor => "soft watercolor washes, gentle edges",
        ImageStyle::Comic => "bold lines, cel-shaded colors, cheerful",
        ImageStyle::PaperCut => "paper-cut collage, layered textures",
        ImageStyle::Realistic => "photorealistic lighting, natural textures",
        ImageStyle::Storybook => "warm cozy storybook, painterly brush, soft light",
    }
}

/// 单场景的完整画面提示词
fn visual_prompt(request: &IllustrationRequest) -> String {
    [
        "Create a square 1:1 illustration for a children's picture book.".to_string(),
        format!("Style: {}.", style_text(request.style)),
        format!(
            "Hero: keep {} visually consistent across scenes (hair, outfit colors, one signature prop).",
            request.hero_name
        ),
        format!("Caption vibe: {}", request.caption),
        format!("Scene: {}", request.scene_prompt),
        "No text on image. Kid-friendly. Warm palette.".to_string(),
    ]
    .join("\n")
}

/// Gemini 图像客户端
pub struct GeminiImageClient {
    client: Client,
    config: GeminiImageClientConfig,
}

impl GeminiImageClient {
    /// 创建新的客户端
    pub fn new(config: GeminiImageClientConfig) -> Result<Self, IllustrationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IllustrationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl IllustratorPort for GeminiImageClient {
    async fn illustrate(
        &self,
        request: &IllustrationRequest,
    ) -> Result<IllustrationResponse, IllustrationError> {
        let mut parts: Vec<RequestPart> = Vec::new();

        // 参考照片放在文本描述之前
        if let Some(photo) = &request.reference_photo {
            parts.push(RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: photo.mime_type.clone(),
                    data: BASE64.encode(&photo.data),
                },
            });
        }

        parts.push(RequestPart::Text {
            text: visual_prompt(request),
        });

        let http_request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        };

        tracing::debug!(
            caption = %request.caption,
            style = request.style.as_str(),
            with_photo = request.reference_photo.is_some(),
            "Sending illustration request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IllustrationError::Timeout
                } else if e.is_connect() {
                    IllustrationError::NetworkError(format!(
                        "Cannot connect to image service: {}",
                        e
                    ))
                } else {
                    IllustrationError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(IllustrationError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| IllustrationError::InvalidResponse(e.to_string()))?;

        let inline = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
            .ok_or_else(|| {
                IllustrationError::InvalidResponse("No image data in response".to_string())
            })?;

        let image_data = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| IllustrationError::InvalidResponse(format!("Bad base64: {}", e)))?;

        tracing::info!(
            mime_type = %inline.mime_type,
            image_size = image_data.len(),
            "Illustration generated"
        );

        Ok(IllustrationResponse {
            image_data,
            mime_type: inline.mime_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> IllustrationRequest {
        IllustrationRequest {
            hero_name: "Mira".to_string(),
            caption: "Mira hears the call.".to_string(),
            scene_prompt: "A cozy bedroom at dawn".to_string(),
            style: ImageStyle::Watercolor,
            reference_photo: None,
        }
    }

    #[test]
    fn test_config_default() {
        let config = GeminiImageClientConfig::new("k");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn test_visual_prompt_composition() {
        let prompt = visual_prompt(&request());
        assert!(prompt.contains("soft watercolor washes"));
        assert!(prompt.contains("keep Mira visually consistent"));
        assert!(prompt.contains("Scene: A cozy bedroom at dawn"));
    }

    #[test]
    fn test_inline_data_round_trip() {
        let encoded = BASE64.encode(b"png-bytes");
        let decoded = BASE64.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, b"png-bytes");
    }
}
