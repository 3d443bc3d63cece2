//! Novel Context - Entities

use serde::{Deserialize, Serialize};

use super::ChapterId;

/// 章节 - 可寻址的阅读单位，拥有自己的书签与笔记
///
/// 不变量:
/// - id 在 Novel 内唯一
/// - 顺序由所在列表决定，与 id 无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    /// 带标签的正文
    content: String,
    #[serde(default)]
    bookmarked: bool,
    #[serde(default)]
    notes: String,
}

impl Chapter {
    pub fn new(id: ChapterId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            bookmarked: false,
            notes: String::new(),
        }
    }

    pub fn id(&self) -> ChapterId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub(crate) fn rewrite(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
    }

    pub(crate) fn toggle_bookmark(&mut self) -> bool {
        self.bookmarked = !self.bookmarked;
        self.bookmarked
    }

    pub(crate) fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}

/// 编辑器提交的章节数据
///
/// `id` 为空表示新建章节
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapterDraft {
    #[serde(default)]
    pub id: Option<ChapterId>,
    pub title: String,
    pub content: String,
}

impl ChapterDraft {
    pub fn new_chapter(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn edit(id: ChapterId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": 3, "title": "T", "content": "<p>x</p>", "extra": 1}"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.id(), ChapterId::new(3));
        assert!(!chapter.is_bookmarked());
        assert_eq!(chapter.notes(), "");
    }

    #[test]
    fn test_toggle_bookmark() {
        let mut chapter = Chapter::new(ChapterId::new(1), "T", "");
        assert!(chapter.toggle_bookmark());
        assert!(!chapter.toggle_bookmark());
    }
}
