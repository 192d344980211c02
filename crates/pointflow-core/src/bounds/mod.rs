//! Module: bounds
//! Responsibility: axis-aligned spatial extent and its union operation.


use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Bounds
///
/// Axis-aligned 3-D extent covering every point a stage can produce.
/// The empty extent is the identity of `grow`, so unions can start from it.
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    #[must_use]
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    /// Degenerate extent holding a single point.
    #[must_use]
    pub const fn from_point(point: [f64; 3]) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// True when no point has been folded in on at least one axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    /// Union this extent with another one in place.
    pub fn grow(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }

        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(other.min[axis]);
            self.max[axis] = self.max[axis].max(other.max[axis]);
        }
    }

    /// Extend this extent to cover one point.
    pub fn grow_point(&mut self, point: [f64; 3]) {
        self.grow(&Self::from_point(point));
    }

    /// Union of every extent, folded in iteration order.
    #[must_use]
    pub fn union_all<'a>(bounds: impl IntoIterator<Item = &'a Self>) -> Self {
        bounds.into_iter().fold(Self::empty(), |mut acc, next| {
            acc.grow(next);
            acc
        })
    }

    /// True when `other` lies entirely inside this extent.
    /// The empty extent is contained in everything.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }

        (0..3).all(|axis| self.min[axis] <= other.min[axis] && other.max[axis] <= self.max[axis])
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }

        write!(
            f,
            "([{}, {}], [{}, {}], [{}, {}])",
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2]
        )
    }
}
