//! Core runtime for pointflow: schemas, bounds, point buffers, the stage and
//! cursor contracts, composite filters, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod bounds;
pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod obs;
pub mod schema;
pub mod stage;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only pipeline vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        bounds::Bounds,
        buffer::PointBuffer,
        filters::MosaicFilter,
        schema::{Dimension, Schema},
        stage::{MemoryStage, SequentialCursor, Stage},
    };
}
