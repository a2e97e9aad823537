//! 叙述脚本核心
//!
//! 纯同步计算，无 I/O、无共享状态：
//! - tags: 情感标签启发式引擎
//! - script: 场景 → 带标签脚本行序列
//! - chunker: 脚本 → 有界提交单元
//!
//! 唯一的非确定性是笑声标签的随机选取，
//! 通过 `*_with` 变体注入随机源可完全固定。

mod chunker;
mod script;
mod tags;

pub use chunker::{split_into_chunks, CHUNK_CHAR_BUDGET};
pub use script::{build_script, build_script_with, split_sentences, NarrationMode, Pace};
pub use tags::{tag_line, tag_line_with, PAUSE_MARKER};
