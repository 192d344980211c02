//! Module: stage
//! Responsibility: stage and sequential-cursor contracts plus the in-memory leaf stage.
//! Does not own: composite stages (see `filters`).
//! Boundary: every upstream input of a pipeline implements `Stage`.

mod contracts;
mod memory;


pub use contracts::{CursorBox, SequentialCursor, Stage, StageProperties, collect_points};
pub use memory::{MemoryCursor, MemoryStage};
