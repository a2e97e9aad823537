//! 文案模型提示词

use crate::application::ports::StoryBrief;
use crate::domain::story::ReadingLevel;

/// 阅读水平对应的措辞约束
pub fn reading_guidance(level: ReadingLevel) -> &'static str {
    match level {
        ReadingLevel::Early => {
            "Use short words and very short sentences. Avoid complex clauses."
        }
        ReadingLevel::Preteen => {
            "Use richer vocabulary with slightly longer sentences; still friendly and clear."
        }
        ReadingLevel::Primary => {
            "Use clear, simple sentences with a friendly, upbeat tone."
        }
    }
}

/// 规划提示词: 产出严格 JSON 的故事弧线
pub fn planner_prompt(brief: &StoryBrief) -> String {
    format!(
        r#"
Plan a {count}-scene children's story arc.

Hero name: {name}
Dream: {dream}
Personality traits: {personality}

Return STRICT JSON with this schema (no markdown, no commentary, no extra keys):
{{
  "scenes": [
    {{
      "id": "1",
      "title": "Short scene title",
      "caption": "One short caption that could sit under an illustration",
      "description": "1-2 sentences describing what happens",
      "illustration_prompt": "One line describing the visual for this scene: setting, mood, hero outfit/props, warm palette, no on-image text"
    }}
  ]
}}
Rules:
- Keep a consistent visual identity for {name} across all scenes (hair, outfit colors, one signature prop).
- Keep it positive and heroic.
- Ensure each scene advances the plot and sets up the next one.
- {guidance}
"#,
        count = brief.scene_count,
        name = brief.name,
        dream = brief.dream,
        personality = brief.personality,
        guidance = reading_guidance(brief.reading_level),
    )
}

/// 写作提示词: 按弧线产出严格 JSON 成稿
pub fn writer_prompt(brief: &StoryBrief, plan_json: &str) -> String {
    format!(
        r#"
Write the story from this plan as STRICT JSON:
{{
  "title": "Picture-book title",
  "moral": "Short positive moral",
  "scenes": [
    {{
      "id": "1",
      "title": "",
      "caption": "",
      "text": "2-4 short sentences",
      "emotion_hint": "excited|serious|gentle|hesitant|urgent|whisper|loud|breathy|soft|calm|quick|slow"
    }}
  ]
}}
Constraints:
- {guidance}
- Keep {name} consistent; uplifting, brave, kind tone.
- Use everyday vocabulary; no on-image text; no violence.
- For emotion_hint, choose the most appropriate from: excited, serious, gentle, hesitant, urgent, whisper, loud, breathy, soft, calm, quick, slow
- Match emotion_hint to the scene's mood and action
Here is the plan JSON:
{plan_json}
"#,
        guidance = reading_guidance(brief.reading_level),
        name = brief.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief() -> StoryBrief {
        StoryBrief {
            name: "Mira".to_string(),
            dream: "firefighter".to_string(),
            personality: "brave".to_string(),
            scene_count: 6,
            reading_level: ReadingLevel::Early,
        }
    }

    #[test]
    fn test_planner_prompt_mentions_hero_and_count() {
        let prompt = planner_prompt(&brief());
        assert!(prompt.contains("6-scene"));
        assert!(prompt.contains("Hero name: Mira"));
        assert!(prompt.contains("very short sentences"));
    }

    #[test]
    fn test_writer_prompt_embeds_plan() {
        let prompt = writer_prompt(&brief(), r#"{"scenes":[]}"#);
        assert!(prompt.contains(r#"{"scenes":[]}"#));
        assert!(prompt.contains("emotion_hint"));
    }
}
