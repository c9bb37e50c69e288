//! 职位卡片快照
//!
//! 每次扫描列表时重新生成，只在当前页面视图内有效

use serde::Deserialize;

/// 快速申请标记文本（必须与页面渲染的文本完全一致，区分大小写）
pub const FAST_APPLY_MARKER: &str = "Easy Apply";

/// 职位卡片的结构化快照
///
/// 从页面一次性提取的纯数据，脱离了 DOM 引用：
/// - `position_index` 是页内位置（从 0 开始），翻页后失效
/// - `text` 是卡片渲染出来的全部文本
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardSnapshot {
    /// 页内位置索引（从 0 开始）
    pub position_index: usize,

    /// 卡片渲染文本
    pub text: String,
}

impl JobCardSnapshot {
    /// 判断卡片是否带有快速申请入口
    ///
    /// 纯谓词：大小写敏感的子串匹配，可独立于浏览器测试
    pub fn has_fast_apply(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> JobCardSnapshot {
        JobCardSnapshot {
            position_index: 0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_marker_substring_match() {
        assert!(card("Rust 工程师\nEasy Apply").has_fast_apply(FAST_APPLY_MARKER));
        assert!(!card("Rust 工程师\nApply on company site").has_fast_apply(FAST_APPLY_MARKER));
    }

    /// 匹配必须区分大小写
    #[test]
    fn test_marker_is_case_sensitive() {
        assert!(!card("easy apply").has_fast_apply(FAST_APPLY_MARKER));
        assert!(!card("EASY APPLY").has_fast_apply(FAST_APPLY_MARKER));
    }
}
