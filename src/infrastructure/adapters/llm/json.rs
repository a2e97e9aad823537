//! 模型输出的宽松 JSON 清理
//!
//! 模型会无视 "no markdown" 约束在 JSON 外包一层代码围栏，
//! 解析前剥掉。

/// 剥掉包裹 JSON 的 markdown 代码围栏
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    for prefix in ["```json", "```JSON", "```"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
            break;
        }
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_untouched() {
        assert_eq!(strip_code_fences(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_strips_json_fence() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\":1}");
    }

    #[test]
    fn test_strips_bare_fence() {
        let raw = "```\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\":1}");
    }

    #[test]
    fn test_strips_fence_with_whitespace() {
        let raw = "  ```json\n{\"a\": [1, 2]}\n```  ";
        assert_eq!(strip_code_fences(raw), "{\"a\": [1, 2]}");
    }
}
