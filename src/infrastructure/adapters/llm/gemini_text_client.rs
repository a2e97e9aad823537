//! Gemini Text Client - 调用外部 LLM 文本接口
//!
//! 实现 StoryWriterPort trait，通过 generateContent REST 接口
//! 完成规划与写作两步。模型输出按严格 JSON 约定解析，
//! 解析失败返回 InvalidResponse 交由调用方兜底。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::json::strip_code_fences;
use super::prompts;
use crate::application::ports::{StoryBrief, StoryGenError, StoryWriterPort};
use crate::domain::story::{ScenePlan, Story};

/// Gemini 文本客户端配置
#[derive(Debug, Clone)]
pub struct GeminiTextClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiTextClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiTextClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// generateContent 线上格式
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
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
    text: Option<String>,
}

/// planner 输出文档
#[derive(Debug, Deserialize)]
struct PlanDocument {
    scenes: Vec<ScenePlan>,
}

/// Gemini 文本客户端
pub struct GeminiTextClient {
    client: Client,
    config: GeminiTextClientConfig,
}

impl GeminiTextClient {
    /// 创建新的客户端
    pub fn new(config: GeminiTextClientConfig) -> Result<Self, StoryGenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoryGenError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// 一次 generateContent 调用，返回首个候选的文本
    async fn generate(&self, prompt: String) -> Result<String, StoryGenError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoryGenError::Timeout
                } else if e.is_connect() {
                    StoryGenError::NetworkError(format!("Cannot connect to LLM service: {}", e))
                } else {
                    StoryGenError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoryGenError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| StoryGenError::InvalidResponse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| {
                StoryGenError::InvalidResponse("No text candidate in response".to_string())
            })?;

        Ok(text)
    }
}

#[async_trait]
impl StoryWriterPort for GeminiTextClient {
    async fn plan_scenes(&self, brief: &StoryBrief) -> Result<Vec<ScenePlan>, StoryGenError> {
        let raw = self.generate(prompts::planner_prompt(brief)).await?;
        let cleaned = strip_code_fences(&raw);

        let document: PlanDocument = serde_json::from_str(cleaned)
            .map_err(|e| StoryGenError::InvalidResponse(format!("Plan JSON: {}", e)))?;

        tracing::info!(scenes = document.scenes.len(), "Story arc planned");

        Ok(document.scenes)
    }

    async fn write_story(
        &self,
        brief: &StoryBrief,
        plan: &[ScenePlan],
    ) -> Result<Story, StoryGenError> {
        let plan_json = serde_json::to_string(plan)
            .map_err(|e| StoryGenError::InvalidResponse(e.to_string()))?;

        let raw = self
            .generate(prompts::writer_prompt(brief, &plan_json))
            .await?;
        let cleaned = strip_code_fences(&raw);

        let story: Story = serde_json::from_str(cleaned)
            .map_err(|e| StoryGenError::InvalidResponse(format!("Story JSON: {}", e)))?;

        tracing::info!(
            title = %story.title,
            scenes = story.scenes.len(),
            "Story written"
        );

        Ok(story)
    }
}
