//! Narration Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::PreviewNarration;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    voices, MediaCategory, MediaStoragePort, SpeechEnginePort, SpeechRequest, VoiceSettings,
};

/// 试听响应
#[derive(Debug, Clone)]
pub struct PreviewNarrationResponse {
    pub audio_url: String,
    pub file_name: String,
}

/// PreviewNarration Handler - 单段文本合成试听
pub struct PreviewNarrationHandler {
    speech_engine: Arc<dyn SpeechEnginePort>,
    media_storage: Arc<dyn MediaStoragePort>,
}

impl PreviewNarrationHandler {
    pub fn new(
        speech_engine: Arc<dyn SpeechEnginePort>,
        media_storage: Arc<dyn MediaStoragePort>,
    ) -> Self {
        Self {
            speech_engine,
            media_storage,
        }
    }

    pub async fn handle(
        &self,
        command: PreviewNarration,
    ) -> Result<PreviewNarrationResponse, ApplicationError> {
        let text = command.text.trim().to_string();
        if text.is_empty() {
            return Err(ApplicationError::validation("text is required"));
        }

        let voice_id = command
            .voice_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| voices::RACHEL.to_string());

        let response = self
            .speech_engine
            .synthesize(SpeechRequest {
                text,
                voice_id: voice_id.clone(),
                settings: VoiceSettings {
                    stability: 0.6,
                    similarity_boost: 0.8,
                    style: 0.3,
                    use_speaker_boost: true,
                },
            })
            .await?;

        let file_name = format!("audio_{}.mp3", Uuid::new_v4());
        let audio_url = self
            .media_storage
            .put(
                &response.audio_data,
                &file_name,
                &response.content_type,
                MediaCategory::Audio,
            )
            .await?;

        tracing::info!(
            voice_id = %voice_id,
            url = %audio_url,
            "Narration preview generated"
        );

        Ok(PreviewNarrationResponse {
            audio_url,
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeSpeechClient, FileMediaStorage};

    fn handler(dir: &std::path::Path) -> PreviewNarrationHandler {
        PreviewNarrationHandler::new(
            Arc::new(FakeSpeechClient::new()),
            Arc::new(FileMediaStorage::new(
                dir.to_path_buf(),
                "http://localhost:5080".to_string(),
            )),
        )
    }

    #[tokio::test]
    async fn test_preview_returns_audio_url() {
        let dir = tempfile::tempdir().unwrap();
        let response = handler(dir.path())
            .handle(PreviewNarration {
                text: "[smiling] Once upon a time.".to_string(),
                voice_id: None,
            })
            .await
            .unwrap();

        assert!(response.audio_url.contains("/media/audio/"));
        assert!(response.file_name.ends_with(".mp3"));
    }

    #[tokio::test]
    async fn test_preview_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let err = handler(dir.path())
            .handle(PreviewNarration {
                text: "  ".to_string(),
                voice_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}
