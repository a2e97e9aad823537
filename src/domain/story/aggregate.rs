//! Story Context - Aggregate

use serde::{Deserialize, Serialize};

use super::entities::{Scene, ScenePlan, SceneSummary};

/// 成稿故事
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub moral: String,
    pub scenes: Vec<Scene>,
}

impl Story {
    pub fn scene_summaries(&self) -> Vec<SceneSummary> {
        self.scenes.iter().map(SceneSummary::from).collect()
    }

    /// 写作模型输出不可解析时，从故事弧线兜底生成成稿
    pub fn fallback_from_plan(name: &str, dream: &str, plan: &[ScenePlan]) -> Self {
        Self {
            title: format!("{name} the {dream} Hero"),
            moral: "Real heroes are kind, careful, and helpful.".to_string(),
            scenes: plan
                .iter()
                .map(|p| Scene {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    caption: p.caption.clone(),
                    text: p.description.clone(),
                    emotion_hint: "encouraging".to_string(),
                })
                .collect(),
        }
    }
}

/// 规划模型输出不可解析时的兜底故事弧线
pub fn fallback_plan(name: &str, dream: &str, scene_count: usize) -> Vec<ScenePlan> {
    (0..scene_count)
        .map(|i| {
            let last = i + 1 == scene_count;
            ScenePlan {
                id: (i + 1).to_string(),
                title: if i == 0 {
                    "The Alarm".to_string()
                } else if last {
                    "Heroes Rest".to_string()
                } else {
                    format!("Scene {}", i + 1)
                },
                caption: if i == 0 {
                    format!("{name} hears the call and gets ready.")
                } else if last {
                    format!("{name} smiles, knowing helping people matters most.")
                } else {
                    format!("{name} keeps going, brave and kind.")
                },
                description: if i == 0 {
                    format!("{name} prepares to act like a real {dream}, quick and careful.")
                } else if last {
                    format!("{name} reflects on the day, proud and thankful.")
                } else {
                    format!("{name} faces a moment and learns something useful.")
                },
                illustration_prompt:
                    "Warm, cozy storybook vibe; soft edges; gentle light; hero centered; no on-image text."
                        .to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_plan_has_requested_length() {
        let plan = fallback_plan("Mira", "firefighter", 6);
        assert_eq!(plan.len(), 6);
        assert_eq!(plan[0].title, "The Alarm");
        assert_eq!(plan[5].title, "Heroes Rest");
        assert!(plan[0].description.contains("firefighter"));
    }

    #[test]
    fn test_fallback_story_mirrors_plan() {
        let plan = fallback_plan("Mira", "firefighter", 4);
        let story = Story::fallback_from_plan("Mira", "firefighter", &plan);
        assert_eq!(story.scenes.len(), 4);
        assert_eq!(story.title, "Mira the firefighter Hero");
        assert_eq!(story.scenes[0].text, plan[0].description);
        assert_eq!(story.scenes[0].emotion_hint, "encouraging");
    }

    #[test]
    fn test_scene_summaries_use_captions() {
        let plan = fallback_plan("Mira", "firefighter", 3);
        let story = Story::fallback_from_plan("Mira", "firefighter", &plan);
        let summaries = story.scene_summaries();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[1].description, story.scenes[1].caption);
    }
}
