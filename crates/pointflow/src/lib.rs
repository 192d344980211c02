//! ## Crate layout
//! - `core`: schemas, bounds, point buffers, stage/cursor contracts, composite
//!   filters, configuration, and observability.
//! - `primitives`: dimension storage kinds shared by the schema layer.
//! - `error`: stable, serializable error surface for pipeline owners.
//!
//! The `prelude` module mirrors the surface a pipeline owner needs to wire
//! stages together and drain them.

pub use pointflow_core as core;
pub use pointflow_primitives as primitives;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Pipeline Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        bounds::Bounds,
        buffer::PointBuffer,
        config::MosaicConfig,
        filters::{MosaicCursor, MosaicFilter},
        schema::{Dimension, Schema},
        stage::{MemoryStage, SequentialCursor as _, Stage as _},
    };
    pub use crate::primitives::DimensionKind;
}
