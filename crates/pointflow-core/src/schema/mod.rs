//! Module: schema
//! Responsibility: point attribute layout and its exact equality contract.
//! Does not own: value storage or coercion between layouts.

#[cfg(test)]
mod tests;

use derive_more::{Deref, IntoIterator};
use pointflow_primitives::DimensionKind;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Dimension
///
/// One named, typed attribute of a point.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Dimension {
    pub name: String,
    pub kind: DimensionKind,
}

impl Dimension {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DimensionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}

///
/// Schema
///
/// Ordered attribute layout of the points flowing through a stage.
/// Two schemas are equal only when names, kinds, and order all match.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, Hash, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    #[into_iterator(owned, ref)]
    dimensions: Vec<Dimension>,
}

impl Schema {
    #[must_use]
    pub const fn new(dimensions: Vec<Dimension>) -> Self {
        Self { dimensions }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            dimensions: Vec::new(),
        }
    }

    /// Standard X/Y/Z double-precision layout.
    #[must_use]
    pub fn xyz() -> Self {
        Self::new(vec![
            Dimension::new("X", DimensionKind::Float64),
            Dimension::new("Y", DimensionKind::Float64),
            Dimension::new("Z", DimensionKind::Float64),
        ])
    }

    /// Return a copy of this schema with one more dimension appended.
    #[must_use]
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// Position of the first dimension with this exact name.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|dim| dim.name == name)
    }

    /// Packed width of one point in this layout.
    #[must_use]
    pub fn point_size_bytes(&self) -> usize {
        self.dimensions.iter().map(|dim| dim.kind.size_bytes()).sum()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, dim) in self.dimensions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Dimension> for Schema {
    fn from_iter<I: IntoIterator<Item = Dimension>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
