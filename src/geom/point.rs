use serde::{Deserialize, Serialize};

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Sum of coordinates, used as the sort key when picking the "middle"
    /// or "outer" points of a four-point set in `Segment::intersect`/`union`.
    #[inline]
    pub(crate) fn coord_sum(&self) -> i64 {
        self.x + self.y
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}
