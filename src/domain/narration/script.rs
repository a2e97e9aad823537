//! 叙述脚本装配
//!
//! 将有序的场景列表展开为完整的带标签朗读脚本（行序列）。
//! 每个场景前插入 `[pause]` 翻页停顿，开场行由 caption 按叙述
//! 模式装饰，正文按句子切分后逐句打标签。

use rand::Rng;

use super::tags::{tag_line_with, PAUSE_MARKER};
use crate::domain::story::Scene;

/// 叙述模式，决定开场行的包装方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationMode {
    /// 平稳讲述（默认）
    #[default]
    Narrator,
    /// 活泼
    Playful,
    /// 史诗感，开场行强制 serious 提示
    Epic,
}

impl NarrationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationMode::Narrator => "narrator",
            NarrationMode::Playful => "playful",
            NarrationMode::Epic => "epic",
        }
    }
}

/// 全局语速
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pace {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Pace {
    /// 映射为每个开场行携带的全局语速标签
    pub fn global_tag(&self) -> &'static str {
        match self {
            Pace::Fast => "quickly",
            Pace::Slow => "slowly",
            Pace::Normal => "calmly",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Slow => "slow",
            Pace::Normal => "normal",
            Pace::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "slow" => Some(Pace::Slow),
            "normal" => Some(Pace::Normal),
            "fast" => Some(Pace::Fast),
            _ => None,
        }
    }
}

/// 装配完整叙述脚本
///
/// 返回的行序列按场景顺序排列，每个场景占
/// `1 ([pause]) + 1 (开场行) + 句子数` 行。
/// 空场景列表返回空序列，不报错。
pub fn build_script(scenes: &[Scene], mode: NarrationMode, pace: Pace) -> Vec<String> {
    build_script_with(scenes, mode, pace, &mut rand::thread_rng())
}

/// 同 [`build_script`]，随机源由调用方注入
pub fn build_script_with<R: Rng>(
    scenes: &[Scene],
    mode: NarrationMode,
    pace: Pace,
    rng: &mut R,
) -> Vec<String> {
    let pace_tag = pace.global_tag();
    let mut lines: Vec<String> = Vec::new();

    for scene in scenes {
        let hint = scene.emotion_hint.to_lowercase();

        // 翻页停顿（首个场景的标记由 chunk 切分吸收）
        lines.push(PAUSE_MARKER.to_string());

        // 开场行: caption 打标签后按模式加装饰前缀
        let opening = match mode {
            NarrationMode::Playful => format!(
                "[{pace_tag}, smiling] {}",
                tag_line_with(&scene.caption, &hint, 0, rng)
            ),
            NarrationMode::Epic => format!(
                "[{pace_tag}, lower pitch, strong] {}",
                tag_line_with(&scene.caption, "serious", 0, rng)
            ),
            NarrationMode::Narrator => format!(
                "[{pace_tag}] {}",
                tag_line_with(&scene.caption, &hint, 0, rng)
            ),
        };
        lines.push(opening);

        // 正文逐句打标签，位置从 1 起（开场行占 0）
        for (i, sentence) in split_sentences(&scene.text).into_iter().enumerate() {
            let position = i + 1;
            let line = if sentence.contains('!') && hint.contains("excited") {
                tag_line_with(sentence, "excited", position, rng)
            } else if sentence.contains('?') {
                tag_line_with(sentence, "hesitant", position, rng)
            } else if sentence.contains("...") {
                tag_line_with(sentence, "slowly", position, rng)
            } else if hint.is_empty() {
                tag_line_with(sentence, "gentle", position, rng)
            } else {
                tag_line_with(sentence, &hint, position, rng)
            };
            lines.push(line);
        }
    }

    lines
}

/// 按句末标点切分句子
///
/// 边界为 `.`/`!`/`?` 后跟空白；句末标点保留在片段上，
/// 空片段丢弃。没有句末标点的文本视为单句。
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminal && ch.is_whitespace() {
            let fragment = text[start..idx].trim();
            if !fragment.is_empty() {
                sentences.push(fragment);
            }
            start = idx;
        }
        prev_terminal = matches!(ch, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(caption: &str, text: &str, hint: &str) -> Scene {
        Scene {
            id: "1".to_string(),
            title: "T".to_string(),
            caption: caption.to_string(),
            text: text.to_string(),
            emotion_hint: hint.to_string(),
        }
    }

    fn pinned() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_split_sentences_keeps_terminal_punctuation() {
        let parts = split_sentences("Lights flash. Wheels roll fast!");
        assert_eq!(parts, vec!["Lights flash.", "Wheels roll fast!"]);
    }

    #[test]
    fn test_split_sentences_without_terminal_punctuation_is_one() {
        let parts = split_sentences("a quiet walk home");
        assert_eq!(parts, vec!["a quiet walk home"]);
    }

    #[test]
    fn test_split_sentences_handles_ellipsis() {
        let parts = split_sentences("Wait... then go.");
        assert_eq!(parts, vec!["Wait...", "then go."]);
    }

    #[test]
    fn test_split_sentences_empty_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_empty_scene_list_builds_empty_script() {
        let lines = build_script_with(&[], NarrationMode::Narrator, Pace::Normal, &mut pinned());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_line_count_per_scene() {
        let scenes = vec![
            scene("One.", "First line. Second line.", "calm"),
            scene("Two.", "Only line", "calm"),
        ];
        let lines = build_script_with(&scenes, NarrationMode::Narrator, Pace::Normal, &mut pinned());
        // 每个场景: [pause] + 开场行 + 句子数
        assert_eq!(lines.len(), (1 + 1 + 2) + (1 + 1 + 1));
        assert_eq!(lines[0], "[pause]");
        assert_eq!(lines[4], "[pause]");
    }

    #[test]
    fn test_epic_opening_contains_lower_pitch() {
        let scenes = vec![scene("The gates open.", "A long road waits.", "gentle")];
        let lines = build_script_with(&scenes, NarrationMode::Epic, Pace::Normal, &mut pinned());
        assert!(lines[1].contains("lower pitch"));
        assert!(lines[1].contains("strong"));
    }

    #[test]
    fn test_playful_opening_contains_smiling() {
        let scenes = vec![scene("Off we go.", "A long road waits.", "gentle")];
        let lines = build_script_with(&scenes, NarrationMode::Playful, Pace::Normal, &mut pinned());
        assert!(lines[1].contains("smiling"));
    }

    #[test]
    fn test_narrator_fast_concrete_scenario() {
        let scenes = vec![scene(
            "Time to help!",
            "Lights flash. Wheels roll fast!",
            "excited",
        )];
        let lines = build_script_with(&scenes, NarrationMode::Narrator, Pace::Fast, &mut pinned());
        assert_eq!(lines.len(), 4);

        // 开场行: 全局语速前缀在最外层，caption 的 "!" 触发 excited 标签
        assert!(lines[1].starts_with("[quickly]"));
        assert!(lines[1].contains("quickly, higher pitch"));

        // 第一句: hint=excited 命中 excited 规则
        assert!(lines[2].contains("quickly"));
        assert!(lines[2].contains("higher pitch"));
        assert!(lines[2].ends_with("Lights flash."));

        // 第二句: "!" + excited hint 走强制 excited 分支，并带 pause
        assert!(lines[3].contains("quickly"));
        assert!(lines[3].contains("higher pitch"));
        assert!(lines[3].contains("pause"));
        assert!(lines[3].ends_with("Wheels roll fast!"));
    }

    #[test]
    fn test_question_sentence_forces_hesitant() {
        let scenes = vec![scene("A fork in the road.", "Which way now?", "excited")];
        let lines = build_script_with(&scenes, NarrationMode::Narrator, Pace::Normal, &mut pinned());
        assert!(lines[2].contains("hesitant"));
        assert!(lines[2].contains("beat"));
    }

    #[test]
    fn test_empty_hint_defaults_to_gentle() {
        let scenes = vec![scene("Evening came.", "It's okay, rest now.", "")];
        let lines = build_script_with(&scenes, NarrationMode::Narrator, Pace::Normal, &mut pinned());
        // gentle 规则: slowly + soft volume
        assert!(lines[2].contains("slowly"));
        assert!(lines[2].contains("soft volume"));
    }
}
