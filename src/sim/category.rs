//! Collision category bitmasks

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Collision category / contact mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const BALL: Category = Category(1 << 0);
    pub const BRICK: Category = Category(1 << 1);
    pub const BOTTOM: Category = Category(1 << 2);
    pub const WALL: Category = Category(1 << 3);

    /// True if any bit is shared
    #[inline]
    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Self) -> Self {
        Category(self.0 | rhs.0)
    }
}

impl BitAnd for Category {
    type Output = Category;

    fn bitand(self, rhs: Self) -> Self {
        Category(self.0 & rhs.0)
    }
}
