//! Scalar vocabulary shared by the schema and buffer layers.

#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// DimensionKind
///
/// Storage type of one point dimension.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DimensionKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl DimensionKind {
    /// Return the full metadata descriptor for one dimension kind.
    #[must_use]
    pub const fn metadata(self) -> DimensionMetadata {
        dimension_kind_registry!(metadata_from_registry, self)
    }

    /// Return the packed width of one value of this kind.
    #[must_use]
    pub const fn size_bytes(self) -> usize {
        self.metadata().size_bytes
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.metadata().is_signed
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        self.metadata().is_float
    }

    /// Stable registry label, matching the variant name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        dimension_kind_registry!(label_from_registry, self)
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// DimensionMetadata
///
/// Layout metadata shared across schema/core layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DimensionMetadata {
    pub size_bytes: usize,
    pub is_signed: bool,
    pub is_float: bool,
}

/// Ordered list of all dimension kinds in registry order.
pub const ALL_DIMENSION_KINDS: [DimensionKind; 10] =
    dimension_kind_registry!(all_kinds_from_registry);
