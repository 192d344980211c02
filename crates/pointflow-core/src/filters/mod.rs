//! Module: filters
//! Responsibility: stages that consume other stages.

pub mod mosaic;

pub use mosaic::{CursorState, MosaicCursor, MosaicFilter};
