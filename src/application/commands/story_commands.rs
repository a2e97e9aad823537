//! Story Commands

use uuid::Uuid;

use crate::application::ports::ReferencePhoto;
use crate::domain::narration::Pace;
use crate::domain::story::{ImageStyle, ReadingLevel, StoryLength, VoicePreset};

/// 生成一篇完整故事（规划 → 写作 → 插画 → 叙述合成 → 落库）
#[derive(Debug, Clone)]
pub struct GenerateStory {
    /// 主角名字
    pub name: String,
    /// 梦想/主题
    pub dream: String,
    /// 性格描述
    pub personality: String,
    pub voice_preset: VoicePreset,
    /// 用户自定义音色，覆盖预设兜底音色
    pub designed_voice_id: Option<String>,
    pub reading_level: ReadingLevel,
    pub story_length: StoryLength,
    pub image_style: ImageStyle,
    pub pace: Pace,
    pub is_public: bool,
    /// 主角参考照片（传给插画生成保持形象一致）
    pub reference_photo: Option<ReferencePhoto>,
}

/// 删除故事
#[derive(Debug, Clone)]
pub struct DeleteStory {
    pub story_id: Uuid,
}

/// 单段文本试听（不落库故事，仅合成一段音频）
#[derive(Debug, Clone)]
pub struct PreviewNarration {
    pub text: String,
    /// 为空时使用默认音色
    pub voice_id: Option<String>,
}
