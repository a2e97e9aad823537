//! Story Context - Value Objects

use serde::{Deserialize, Serialize};

use crate::domain::narration::NarrationMode;

/// 朗读音色预设，决定叙述模式和兜底音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicePreset {
    #[default]
    WarmNarrator,
    PlayfulHero,
    EpicGuardian,
}

impl VoicePreset {
    pub fn narration_mode(&self) -> NarrationMode {
        match self {
            VoicePreset::WarmNarrator => NarrationMode::Narrator,
            VoicePreset::PlayfulHero => NarrationMode::Playful,
            VoicePreset::EpicGuardian => NarrationMode::Epic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoicePreset::WarmNarrator => "warm_narrator",
            VoicePreset::PlayfulHero => "playful_hero",
            VoicePreset::EpicGuardian => "epic_guardian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "warm_narrator" => Some(VoicePreset::WarmNarrator),
            "playful_hero" => Some(VoicePreset::PlayfulHero),
            "epic_guardian" => Some(VoicePreset::EpicGuardian),
            _ => None,
        }
    }
}

/// 目标阅读水平，影响文案提示词的措辞约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    Early,
    #[default]
    Primary,
    Preteen,
}

impl ReadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Early => "early",
            ReadingLevel::Primary => "primary",
            ReadingLevel::Preteen => "preteen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "early" => Some(ReadingLevel::Early),
            "primary" => Some(ReadingLevel::Primary),
            "preteen" => Some(ReadingLevel::Preteen),
            _ => None,
        }
    }
}

/// 故事篇幅档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryLength {
    Short,
    #[default]
    Standard,
    Epic,
}

impl StoryLength {
    /// 档位对应的场景数
    pub fn scene_count(&self) -> usize {
        match self {
            StoryLength::Short => 4,
            StoryLength::Standard => 6,
            StoryLength::Epic => 9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Standard => "standard",
            StoryLength::Epic => "epic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "short" => Some(StoryLength::Short),
            "standard" => Some(StoryLength::Standard),
            "epic" => Some(StoryLength::Epic),
            _ => None,
        }
    }
}

/// 插画风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStyle {
    Watercolor,
    #[default]
    Storybook,
    Comic,
    PaperCut,
    Realistic,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Watercolor => "watercolor",
            ImageStyle::Storybook => "storybook",
            ImageStyle::Comic => "comic",
            ImageStyle::PaperCut => "paper_cut",
            ImageStyle::Realistic => "realistic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "watercolor" => Some(ImageStyle::Watercolor),
            "storybook" => Some(ImageStyle::Storybook),
            "comic" => Some(ImageStyle::Comic),
            "paper_cut" => Some(ImageStyle::PaperCut),
            "realistic" => Some(ImageStyle::Realistic),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_length_scene_counts() {
        assert_eq!(StoryLength::Short.scene_count(), 4);
        assert_eq!(StoryLength::Standard.scene_count(), 6);
        assert_eq!(StoryLength::Epic.scene_count(), 9);
    }

    #[test]
    fn test_voice_preset_maps_to_mode() {
        assert_eq!(
            VoicePreset::PlayfulHero.narration_mode(),
            NarrationMode::Playful
        );
        assert_eq!(
            VoicePreset::EpicGuardian.narration_mode(),
            NarrationMode::Epic
        );
    }

    #[test]
    fn test_round_trip_parsing() {
        for preset in ["warm_narrator", "playful_hero", "epic_guardian"] {
            assert_eq!(VoicePreset::from_str(preset).unwrap().as_str(), preset);
        }
        assert!(ImageStyle::from_str("oil_painting").is_none());
    }
}
