//! Eleven Speech Client - 调用外部语音合成 HTTP 服务
//!
//! 实现 SpeechEnginePort trait，通过 HTTP 调用 ElevenLabs 风格的
//! text-to-speech 接口
//!
//! 外部 API:
//! POST {base}/v1/text-to-speech/{voice_id}?output_format=mp3_44100_128
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse, VoiceSettings,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest {
    text: String,
    model_id: String,
    voice_settings: VoiceSettings,
}

/// Eleven Speech 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenSpeechClientConfig {
    /// 合成服务基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 模型 ID（v3 支持 [tag] 表现力指令）
    pub model_id: String,
    /// 输出格式
    pub output_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: String::new(),
            model_id: "eleven_v3".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ElevenSpeechClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Eleven Speech 客户端
pub struct ElevenSpeechClient {
    client: Client,
    config: ElevenSpeechClientConfig,
}

impl ElevenSpeechClient {
    /// 创建新的客户端
    pub fn new(config: ElevenSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesis_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            self.config.base_url, voice_id, self.config.output_format
        )
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }
}

#[async_trait]
impl SpeechEnginePort for ElevenSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let http_request = SpeechHttpRequest {
            text: request.text.clone(),
            model_id: self.config.model_id.clone(),
            voice_settings: request.settings,
        };

        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = http_request.text.len(),
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(self.synthesis_url(&request.voice_id))
            .header("xi-api-key", &self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to speech service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SpeechError::VoiceNotFound(request.voice_id));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            voice_id = %request.voice_id,
            audio_size = audio_data.len(),
            "Speech synthesis completed"
        );

        Ok(SpeechResponse {
            audio_data,
            content_type,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .header("xi-api-key", &self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenSpeechClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_v3");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenSpeechClientConfig::new("k").with_timeout(60);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_synthesis_url_includes_voice_and_format() {
        let client = ElevenSpeechClient::new(ElevenSpeechClientConfig::new("k")).unwrap();
        assert_eq!(
            client.synthesis_url("abc123"),
            "https://api.elevenlabs.io/v1/text-to-speech/abc123?output_format=mp3_44100_128"
        );
    }
}
