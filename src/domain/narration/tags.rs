//! 情感标签启发式引擎
//!
//! 对单行文本生成朗读指令标签（节奏、音高、音量、呼吸、停顿）。
//! 规则表为有序的独立 (条件, 标签) 对：同时匹配 emotion hint 子串
//! （大小写不敏感）与文本内容线索（正则），规则之间不互斥，
//! 一行可以累积多个类别的标签，最后去重并保留首次出现顺序。
//!
//! 标签由下游语音合成服务消费，前端展示时会被过滤掉，
//! 不属于朗读正文。

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// 场景分隔标记，chunk 切分以它为边界
pub const PAUSE_MARKER: &str = "[pause]";

static EXCITED_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)!|let.?s go|ready|woo+|yay|hooray").unwrap());
static SERIOUS_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)focus|careful|listen|danger|stay calm|steady").unwrap());
static GENTLE_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)it.?s okay|you.?re safe|all right|we.?re here").unwrap());
static URGENT_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)hurry|quick|fast|rush").unwrap());
static HESITANT_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)maybe|perhaps|um|uh").unwrap());
static WHISPER_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)secret|quiet|shh").unwrap());
static LOUD_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)shout|yell|boom|crash").unwrap());
static BREATHY_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)wind|sigh|breath").unwrap());
static SOFT_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)gentle|quiet|whisper").unwrap());
static LAUGH_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ha|hee|hooray|yay|awesome|we did it").unwrap());
static SIGH_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)oh|ah|wow|phew").unwrap());

/// 单条标签规则
///
/// 条件: hint 包含 `hint_key`，或文本匹配 `cue`
struct TagRule {
    hint_key: &'static str,
    cue: &'static Lazy<Regex>,
    tags: &'static [&'static str],
}

/// 固定标签规则表（求值顺序即数组顺序，不短路）
static RULES: [TagRule; 9] = [
    TagRule {
        hint_key: "excited",
        cue: &EXCITED_CUE,
        tags: &["quickly", "higher pitch"],
    },
    TagRule {
        hint_key: "serious",
        cue: &SERIOUS_CUE,
        tags: &["calmly", "lower pitch"],
    },
    TagRule {
        hint_key: "gentle",
        cue: &GENTLE_CUE,
        tags: &["slowly", "soft volume"],
    },
    TagRule {
        hint_key: "urgent",
        cue: &URGENT_CUE,
        tags: &["urgently"],
    },
    TagRule {
        hint_key: "hesitant",
        cue: &HESITANT_CUE,
        tags: &["hesitant"],
    },
    TagRule {
        hint_key: "whisper",
        cue: &WHISPER_CUE,
        tags: &["whisper"],
    },
    TagRule {
        hint_key: "loud",
        cue: &LOUD_CUE,
        tags: &["loud", "strong"],
    },
    TagRule {
        hint_key: "breathy",
        cue: &BREATHY_CUE,
        tags: &["breathy"],
    },
    TagRule {
        hint_key: "soft",
        cue: &SOFT_CUE,
        tags: &["soft volume"],
    },
];

/// 笑声标签候选（随机取一个）
const LAUGH_TAGS: [&str; 3] = ["giggle", "light chuckle", "laugh"];

/// 对一行文本生成标签前缀
///
/// `position_in_scene` 为该行在场景内的索引，0 表示场景开场行。
/// 笑声标签的随机选取使用 `thread_rng`；需要确定性结果时用
/// [`tag_line_with`] 注入固定种子的随机源。
pub fn tag_line(text: &str, hint: &str, position_in_scene: usize) -> String {
    tag_line_with(text, hint, position_in_scene, &mut rand::thread_rng())
}

/// 同 [`tag_line`]，随机源由调用方注入
pub fn tag_line_with<R: Rng>(text: &str, hint: &str, position_in_scene: usize, rng: &mut R) -> String {
    let trimmed = text.trim();
    let hint_lower = hint.to_lowercase();

    let mut tags: Vec<&'static str> = Vec::new();

    // 固定规则: 每条独立求值，不短路
    for rule in &RULES {
        if hint_lower.contains(rule.hint_key) || rule.cue.is_match(trimmed) {
            tags.extend_from_slice(rule.tags);
        }
    }

    // 笑声: 从候选中随机取一个
    if hint_lower.contains("laugh") || LAUGH_CUE.is_match(trimmed) {
        tags.push(LAUGH_TAGS[rng.gen_range(0..LAUGH_TAGS.len())]);
    }

    // 叹息
    if hint_lower.contains("sigh") || SIGH_CUE.is_match(trimmed) {
        tags.push("sigh");
    }

    // 位置/长度/标点规则
    if position_in_scene == 0 {
        tags.insert(0, "smiling");
    }
    if trimmed.chars().count() > 90 {
        tags.push("quick breath");
    }
    if trimmed.contains('?') {
        tags.push("beat");
    }
    if trimmed.contains('!') {
        tags.push("pause");
    }

    // 去重，保留首次出现顺序
    let mut unique: Vec<&'static str> = Vec::new();
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }

    if unique.is_empty() {
        trimmed.to_string()
    } else {
        format!("[{}] {}", unique.join(", "), trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinned() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_excited_hint_adds_pace_and_pitch() {
        let line = tag_line_with("We ride at dawn", "excited", 2, &mut pinned());
        assert!(line.starts_with('['));
        assert!(line.contains("quickly"));
        assert!(line.contains("higher pitch"));
    }

    #[test]
    fn test_exclamation_triggers_excitement_and_pause() {
        let line = tag_line_with("Lights on!", "", 1, &mut pinned());
        assert!(line.contains("quickly"));
        assert!(line.contains("higher pitch"));
        assert!(line.contains("pause"));
    }

    #[test]
    fn test_opening_line_starts_smiling() {
        let line = tag_line_with("Down by the river!", "", 0, &mut pinned());
        assert!(line.starts_with("[smiling, "));
    }

    #[test]
    fn test_question_gets_beat() {
        let line = tag_line_with("Will it work?", "", 2, &mut pinned());
        assert!(line.contains("beat"));
    }

    #[test]
    fn test_long_line_gets_quick_breath() {
        let long = "x".repeat(91);
        let line = tag_line_with(&long, "", 3, &mut pinned());
        assert!(line.contains("quick breath"));
    }

    #[test]
    fn test_duplicate_tags_removed_keeping_first_position() {
        // gentle hint 给出 soft volume，文本 "quiet" 再次命中 soft 规则
        let line = tag_line_with("It was quiet there", "gentle", 2, &mut pinned());
        let prefix_end = line.find(']').unwrap();
        let tags: Vec<&str> = line[1..prefix_end].split(", ").collect();
        let soft_count = tags.iter().filter(|t| **t == "soft volume").count();
        assert_eq!(soft_count, 1);
        // whisper 规则由 "quiet" 触发，排在 gentle 规则之后
        assert!(tags.contains(&"slowly"));
        assert!(tags.contains(&"whisper"));
    }

    #[test]
    fn test_rules_stack_across_categories() {
        // "Hurry!" 同时命中 excited(!)、urgent(hurry) 与 pause(!)
        let line = tag_line_with("Hurry, everyone!", "", 1, &mut pinned());
        assert!(line.contains("quickly"));
        assert!(line.contains("urgently"));
        assert!(line.contains("pause"));
    }

    #[test]
    fn test_laugh_tag_is_one_of_candidates() {
        let line = tag_line_with("We did it together", "laugh", 2, &mut pinned());
        let got = LAUGH_TAGS.iter().any(|t| line.contains(t));
        assert!(got, "expected a laugh tag in: {line}");
    }

    #[test]
    fn test_pinned_rng_is_deterministic() {
        let a = tag_line_with("We did it together", "laugh", 2, &mut pinned());
        let b = tag_line_with("We did it together", "laugh", 2, &mut pinned());
        assert_eq!(a, b);
    }

    #[test]
    fn test_plain_line_passes_through_unchanged() {
        let line = tag_line_with("  The cat sat.  ", "", 3, &mut pinned());
        assert_eq!(line, "The cat sat.");
    }

    #[test]
    fn test_empty_hint_is_tolerated() {
        let line = tag_line_with("A secret door", "", 2, &mut pinned());
        assert!(line.contains("whisper"));
    }
}
