//! Confirmation Port - 不可逆操作确认
//!
//! 删除章节前由展示层询问用户

use crate::domain::novel::Chapter;

/// 删除确认
pub trait ConfirmationPort {
    /// 返回 true 才会真正删除
    fn confirm_delete(&self, chapter: &Chapter) -> bool;
}

impl<F> ConfirmationPort for F
where
    F: Fn(&Chapter) -> bool,
{
    fn confirm_delete(&self, chapter: &Chapter) -> bool {
        self(chapter)
    }
}

/// 始终同意（测试与脚本场景）
pub struct AlwaysConfirm;

impl ConfirmationPort for AlwaysConfirm {
    fn confirm_delete(&self, _chapter: &Chapter) -> bool {
        true
    }
}

/// 始终拒绝
pub struct NeverConfirm;

impl ConfirmationPort for NeverConfirm {
    fn confirm_delete(&self, _chapter: &Chapter) -> bool {
        false
    }
}
