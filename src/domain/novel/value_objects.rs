//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};

/// 章节唯一标识
///
/// 创建时分配（现有最大值 + 1），删除后在同一编号方案内不再复用
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChapterId(u64);

impl ChapterId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// 下一个编号；已到 u64::MAX 时返回 None
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for ChapterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 当前章节的滚动百分比
///
/// 不变量: 取值范围 [0, 100]，非有限值视为 0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    pub const TOP: Self = Self(0.0);
    pub const END: Self = Self(100.0);

    pub fn new(percentage: f64) -> Self {
        if !percentage.is_finite() {
            return Self::TOP;
        }
        Self(percentage.clamp(0.0, 100.0))
    }

    pub fn percentage(&self) -> f64 {
        self.0
    }
}

impl From<f64> for ScrollFraction {
    fn from(percentage: f64) -> Self {
        Self::new(percentage)
    }
}
