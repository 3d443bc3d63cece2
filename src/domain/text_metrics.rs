//! 文本度量
//!
//! 剥离章节内容中的标签并统计词数，纯函数，无状态

use regex::Regex;
use std::sync::OnceLock;

/// 标签模式 `<...>`
fn tag_pattern() -> Option<&'static Regex> {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

/// 剥离标签
///
/// 每个标签替换为一个空格，保证 `</p><p>` 两侧的词不会被拼接
pub fn strip_markup(content: &str) -> String {
    match tag_pattern() {
        Some(re) => re.replace_all(content, " ").into_owned(),
        None => content.to_string(),
    }
}

/// 规范化文本：剥离标签后把连续空白折叠为单个空格，并去掉首尾空白
///
/// 搜索与摘要都基于规范化后的文本
pub fn normalize_text(content: &str) -> String {
    collapse_whitespace(&strip_markup(content))
}

/// 折叠连续空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 统计词数
///
/// 空内容或只有标签的内容返回 0
pub fn count_words(content: &str) -> usize {
    strip_markup(content).split_whitespace().count()
}
