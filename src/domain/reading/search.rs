//! Reading Context - 全文搜索
//!
//! 每次查询重新扫描章节内容，不维护持久化索引。
//! 匹配基于规范化文本（剥离标签、折叠空白），避免命中标签属性。

use serde::Serialize;

use crate::domain::novel::{Chapter, ChapterId};
use crate::domain::text_metrics::{collapse_whitespace, normalize_text};

/// 默认摘要上下文字符数
pub const DEFAULT_CONTEXT_CHARS: usize = 40;

/// 搜索选项
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// 匹配前后各保留的字符数
    pub context_chars: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }
}

/// 命中位置附近的文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub before: String,
    pub matched: String,
    pub after: String,
    pub truncated_before: bool,
    pub truncated_after: bool,
}

/// 单个命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub chapter_id: ChapterId,
    pub chapter_title: String,
    /// 在该章节内的出现序号（从 0 开始，按文档顺序）
    pub result_index: usize,
    pub snippet: Snippet,
}

/// 一次查询的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub total: usize,
    pub chapters_matched: usize,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    fn empty(query: String) -> Self {
        Self {
            query,
            total: 0,
            chapters_matched: 0,
            hits: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// 大小写折叠后的文本，保留到原始字符位置的映射
struct FoldedText {
    folded: String,
    /// folded 中每个字节对应的原始字符下标
    owner: Vec<usize>,
}

fn fold(chars: &[char]) -> FoldedText {
    let mut folded = String::with_capacity(chars.len());
    let mut owner = Vec::with_capacity(chars.len());
    for (index, ch) in chars.iter().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            owner.extend(std::iter::repeat(index).take(lower.len_utf8()));
        }
    }
    FoldedText { folded, owner }
}

fn fold_query(query: &str) -> String {
    query.chars().flat_map(char::to_lowercase).collect()
}

/// 规范化查询词：去首尾空白并折叠内部空白
pub fn normalize_query(query: &str) -> String {
    collapse_whitespace(query)
}

/// 在章节列表中搜索
///
/// - 不区分大小写的子串匹配，按章节显示顺序扫描
/// - 同一章节内的命中互不重叠
/// - 空查询（含纯空白）返回空结果
pub fn search_chapters(chapters: &[Chapter], query: &str, options: &SearchOptions) -> SearchResults {
    let query = normalize_query(query);
    if query.is_empty() {
        return SearchResults::empty(query);
    }
    let needle = fold_query(&query);

    let mut hits = Vec::new();
    let mut chapters_matched = 0;

    for chapter in chapters {
        let before = hits.len();
        scan_chapter(chapter, &needle, options, &mut hits);
        if hits.len() > before {
            chapters_matched += 1;
        }
    }

    SearchResults {
        query,
        total: hits.len(),
        chapters_matched,
        hits,
    }
}

/// 统计某章节中的出现次数
pub fn count_occurrences(chapter: &Chapter, query: &str) -> usize {
    let needle = fold_query(&normalize_query(query));
    if needle.is_empty() {
        return 0;
    }
    let chars: Vec<char> = normalize_text(chapter.content()).chars().collect();
    fold(&chars).folded.matches(needle.as_str()).count()
}

fn scan_chapter(chapter: &Chapter, needle: &str, options: &SearchOptions, hits: &mut Vec<SearchHit>) {
    let chars: Vec<char> = normalize_text(chapter.content()).chars().collect();
    let text = fold(&chars);

    for (result_index, (start, matched)) in text.folded.match_indices(needle).enumerate() {
        let end = start + matched.len();
        let first = text.owner[start];
        let last = text.owner[end - 1] + 1;

        hits.push(SearchHit {
            chapter_id: chapter.id(),
            chapter_title: chapter.title().to_string(),
            result_index,
            snippet: snippet(&chars, first, last, options.context_chars),
        });
    }
}

fn snippet(chars: &[char], start: usize, end: usize, context: usize) -> Snippet {
    let from = start.saturating_sub(context);
    let to = (end + context).min(chars.len());
    Snippet {
        before: chars[from..start].iter().collect(),
        matched: chars[start..end].iter().collect(),
        after: chars[end..to].iter().collect(),
        truncated_before: from > 0,
        truncated_after: to < chars.len(),
    }
}
