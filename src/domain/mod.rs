//! Domain Layer - 领域层
//!
//! 包含:
//! - Story Context: 故事领域模型（场景、成稿、请求档位）
//! - Narration: 叙述脚本装配核心（纯函数，无 I/O）

pub mod narration;
pub mod story;
