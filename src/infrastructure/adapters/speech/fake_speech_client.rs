//! Fake Speech Client - 用于测试的语音合成客户端
//!
//! 始终返回固定的音频数据，不实际调用合成服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};

/// 固定返回的音频数据（非法 MP3，仅测试流转用）
const FAKE_AUDIO: &[u8] = b"ID3\x03\x00fabula-fake-audio";

/// Fake Speech Client
///
/// 可配置在第 N 次调用时失败，用于验证占位结果语义
pub struct FakeSpeechClient {
    /// 失败的调用序号（0 起）
    fail_at: Option<usize>,
    calls: AtomicUsize,
}

impl FakeSpeechClient {
    pub fn new() -> Self {
        Self {
            fail_at: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 第 `index` 次调用返回错误，其余成功
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            calls: AtomicUsize::new(0),
        }
    }

    /// 已处理的调用数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeSpeechClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            call = call,
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeSpeechClient: returning fixed audio"
        );

        // 模拟合成延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

        if self.fail_at == Some(call) {
            return Err(SpeechError::ServiceError(format!(
                "synthetic failure at call {}",
                call
            )));
        }

        Ok(SpeechResponse {
            audio_data: FAKE_AUDIO.to_vec(),
            content_type: "audio/mpeg".to_string(),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::VoiceSettings;

    fn request() -> SpeechRequest {
        SpeechRequest {
            text: "[pause] hello".to_string(),
            voice_id: "v".to_string(),
            settings: VoiceSettings::default(),
        }
    }

    #[tokio::test]
    async fn test_returns_fixed_audio() {
        let client = FakeSpeechClient::new();
        let response = client.synthesize(request()).await.unwrap();
        assert_eq!(response.audio_data, FAKE_AUDIO);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fails_only_at_configured_call() {
        let client = FakeSpeechClient::failing_at(1);
        assert!(client.synthesize(request()).await.is_ok());
        assert!(client.synthesize(request()).await.is_err());
        assert!(client.synthesize(request()).await.is_ok());
    }
}
