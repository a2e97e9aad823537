//! Chunk 切分
//!
//! 将装配好的脚本按 `[pause]` 场景边界切成独立的合成单元。
//! 下游语音服务单次请求有约 3000 字符的实际上限
//! ([`CHUNK_CHAR_BUDGET`])，按场景切分在儿童故事的篇幅下
//! 天然落在限额内；单场景超限时在提交侧记录告警。

use super::tags::PAUSE_MARKER;

/// 下游语音服务单次请求的参考字符上限
pub const CHUNK_CHAR_BUDGET: usize = 3000;

/// 将脚本行切成提交单元
///
/// 行之间以单个空格连接后按 `[pause]` 切分；除首个 chunk 外
/// 重新补上 `"[pause] "` 前缀，让独立提交的单元仍携带
/// 场景边界的停顿提示。顺序与场景顺序一致。
pub fn split_into_chunks(lines: &[String]) -> Vec<String> {
    let script = lines.join(" ");

    script
        .split(PAUSE_MARKER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                segment.to_string()
            } else {
                format!("{} {}", PAUSE_MARKER, segment)
            }
        })
        .collect()
}
