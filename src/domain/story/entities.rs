//! Story Context - Entities

use serde::{Deserialize, Serialize};

/// 规划阶段产出的场景骨架
///
/// planner 返回的是故事弧线: 每个场景推动情节并为下一个做铺垫。
/// `illustration_prompt` 只供插画生成使用，不进入朗读内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub description: String,
    pub illustration_prompt: String,
}

/// 成稿场景 - 叙述的最小单位
///
/// `emotion_hint` 是开放的自由文本标签（"excited"、"gentle"...），
/// 允许为空或未知值，标签引擎负责容错。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub text: String,
    #[serde(default)]
    pub emotion_hint: String,
}

/// 场景摘要（列表接口用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSummary {
    pub title: String,
    pub description: String,
}

impl From<&Scene> for SceneSummary {
    fn from(scene: &Scene) -> Self {
        Self {
            title: scene.title.clone(),
            description: scene.caption.clone(),
        }
    }
}
