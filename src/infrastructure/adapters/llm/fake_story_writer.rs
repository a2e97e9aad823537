//! Fake Story Writer - 用于测试的文案模型客户端
//!
//! 返回确定性的弧线与成稿，不实际调用 LLM

use async_trait::async_trait;

use crate::application::ports::{StoryBrief, StoryGenError, StoryWriterPort};
use crate::domain::story::{fallback_plan, ScenePlan, Story};

/// Fake Story Writer
pub struct FakeStoryWriter;

impl FakeStoryWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeStoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryWriterPort for FakeStoryWriter {
    async fn plan_scenes(&self, brief: &StoryBrief) -> Result<Vec<ScenePlan>, StoryGenError> {
        tracing::debug!(
            name = %brief.name,
            scenes = brief.scene_count,
            "FakeStoryWriter: returning deterministic plan"
        );
        Ok(fallback_plan(&brief.name, &brief.dream, brief.scene_count))
    }

    async fn write_story(
        &self,
        brief: &StoryBrief,
        plan: &[ScenePlan],
    ) -> Result<Story, StoryGenError> {
        Ok(Story::fallback_from_plan(&brief.name, &brief.dream, plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::ReadingLevel;

    #[tokio::test]
    async fn test_plan_and_story_are_consistent() {
        let writer = FakeStoryWriter::new();
        let brief = StoryBrief {
            name: "Mira".to_string(),
            dream: "pilot".to_string(),
            personality: "curious".to_string(),
            scene_count: 4,
            reading_level: ReadingLevel::Primary,
        };

        let plan = writer.plan_scenes(&brief).await.unwrap();
        let story = writer.write_story(&brief, &plan).await.unwrap();

        assert_eq!(plan.len(), 4);
        assert_eq!(story.scenes.len(), 4);
        assert_eq!(story.scenes[2].caption, plan[2].caption);
    }
}
