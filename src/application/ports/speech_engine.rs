//! Speech Engine Port - 语音合成抽象
//!
//! 每次调用合成一个有界长度的文本 chunk，具体实现在
//! infrastructure/adapters 层

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::story::VoicePreset;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),
}

/// 朗读表现力参数
///
/// 由能量/响度/引导三个 0-100 档位折算：合成端只接受
/// stability ∈ {0.0, 0.5, 1.0}，style/similarity 限幅。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.55,
            similarity_boost: 0.8,
            style: 0.25,
            use_speaker_boost: true,
        }
    }
}

impl VoiceSettings {
    /// 从 0-100 档位折算
    pub fn from_knobs(energy: u8, loudness: u8, guidance: u8) -> Self {
        let stability = if energy < 33 {
            0.0
        } else if energy < 66 {
            0.5
        } else {
            1.0
        };

        Self {
            stability,
            similarity_boost: clamp(f32::from(loudness) / 100.0, 0.6, 1.0),
            style: clamp(f32::from(guidance) / 100.0, 0.1, 1.0),
            use_speaker_boost: true,
        }
    }
}

fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的 chunk 文本（含 [tag] 指令）
    pub text: String,
    /// 音色 ID（合成服务侧的标识，对本服务不透明）
    pub voice_id: String,
    /// 表现力参数
    pub settings: VoiceSettings,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// 音频数据（MP3）
    pub audio_data: Vec<u8>,
    /// MIME 类型
    pub content_type: String,
}

/// 预设音色 ID
pub mod voices {
    pub const RACHEL: &str = "21m00Tcm4TlvDq8ikWAM";
    pub const FREYA: &str = "jsCqWAovK2LkecY7zXl4";
    pub const DANIEL: &str = "onwK4e9ZLuTAKqWW03F9";
}

/// 预设对应的兜底音色
pub fn preset_voice(preset: VoicePreset) -> &'static str {
    match preset {
        VoicePreset::WarmNarrator => voices::RACHEL,
        VoicePreset::PlayfulHero => voices::FREYA,
        VoicePreset::EpicGuardian => voices::DANIEL,
    }
}

/// Speech Engine Port
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成一个 chunk
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError>;

    /// 检查合成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_snaps_to_three_levels() {
        assert_eq!(VoiceSettings::from_knobs(10, 80, 35).stability, 0.0);
        assert_eq!(VoiceSettings::from_knobs(50, 80, 35).stability, 0.5);
        assert_eq!(VoiceSettings::from_knobs(70, 80, 35).stability, 1.0);
    }

    #[test]
    fn test_style_and_similarity_are_clamped() {
        let settings = VoiceSettings::from_knobs(70, 10, 0);
        assert_eq!(settings.similarity_boost, 0.6);
        assert_eq!(settings.style, 0.1);

        let settings = VoiceSettings::from_knobs(70, 100, 100);
        assert_eq!(settings.similarity_boost, 1.0);
        assert_eq!(settings.style, 1.0);
    }

    #[test]
    fn test_preset_voice_mapping() {
        assert_eq!(preset_voice(VoicePreset::WarmNarrator), voices::RACHEL);
        assert_eq!(preset_voice(VoicePreset::PlayfulHero), voices::FREYA);
        assert_eq!(preset_voice(VoicePreset::EpicGuardian), voices::DANIEL);
    }
}
