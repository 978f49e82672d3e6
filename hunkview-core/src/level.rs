//! Visibility level policy.
//!
//! A `VisibilityLevel` is the global default expansion depth (1–4). The mapping
//! from a level to concrete per-entity flags lives here so the reducer and the
//! host renderer always agree on what "level 3" means.
//!
//! | Level | Section   | File          | Hunk      | Commit    |
//! |-------|-----------|---------------|-----------|-----------|
//! | 1     | collapsed | collapsed     | collapsed | collapsed |
//! | 2     | expanded  | headers-only  | collapsed | collapsed |
//! | 3     | expanded  | full          | expanded  | collapsed |
//! | 4     | expanded  | full          | expanded  | expanded  |

use serde::{Deserialize, Serialize};

use crate::expansion::FileExpanded;

/// Global expansion depth, always within `[MIN, MAX]`.
///
/// Construction never fails: out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct VisibilityLevel(u8);

impl VisibilityLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Clamps `level` into `[1, 4]`.
    pub fn new(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// File display mode implied by this level.
    pub fn file_expansion(self) -> FileExpanded {
        match self.0 {
            1 => FileExpanded::Collapsed,
            2 => FileExpanded::HeadersOnly,
            _ => FileExpanded::Full,
        }
    }

    pub fn section_collapsed(self) -> bool {
        self.0 == 1
    }

    pub fn hunk_expanded(self) -> bool {
        self.0 >= 3
    }

    pub fn commit_expanded(self) -> bool {
        self.0 >= 4
    }
}

impl Default for VisibilityLevel {
    /// Level 2: sections open, files showing hunk headers only.
    fn default() -> Self {
        Self(2)
    }
}

impl From<i64> for VisibilityLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

impl From<VisibilityLevel> for u8 {
    fn from(level: VisibilityLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
