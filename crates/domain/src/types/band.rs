//! Alternating display bands for projected rows

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Two-valued cosmetic attribute used for alternating row styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Even,
    Odd,
}

impl Band {
    /// Band for a zero-based position in the visible list
    pub const fn for_position(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

impl_domain_enum_conversions!(Band {
    Even => "even",
    Odd => "odd",
});
