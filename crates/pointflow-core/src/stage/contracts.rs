use crate::{
    bounds::Bounds,
    buffer::PointBuffer,
    error::{ErrorOrigin, StageError},
    schema::Schema,
};
use serde::{Deserialize, Serialize};

///
/// StageProperties
///
/// Core metadata every stage carries: layout, extent, and cardinality.
/// Computed once when the stage is built and served unchanged afterwards.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StageProperties {
    pub schema: Schema,
    pub bounds: Bounds,
    pub point_count: u64,
}

impl StageProperties {
    #[must_use]
    pub const fn new(schema: Schema, bounds: Bounds, point_count: u64) -> Self {
        Self {
            schema,
            bounds,
            point_count,
        }
    }
}

///
/// Stage
///
/// Point source or transform step in a pipeline.
/// Stages are immutable once built and may be shared across threads; all
/// traversal state lives in the cursors they hand out.
///

pub trait Stage: Sync {
    fn name(&self) -> &str;

    fn properties(&self) -> &StageProperties;

    /// Open a new cursor positioned at the first point.
    fn create_cursor(&self) -> Result<CursorBox<'_>, StageError>;

    fn schema(&self) -> &Schema {
        &self.properties().schema
    }

    fn bounds(&self) -> &Bounds {
        &self.properties().bounds
    }

    fn point_count(&self) -> u64 {
        self.properties().point_count
    }
}

///
/// SequentialCursor
///
/// Forward-only reader over one stage's points.
/// `read` fills at most `buffer.remaining()` points and returns how many it wrote.
///

pub trait SequentialCursor {
    /// Append up to `buffer.remaining()` points and return how many were written.
    ///
    /// On error the points written before the failure stay in the buffer; the
    /// count is not returned, so callers recover it from `buffer.len()`.
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError>;

    /// Advance past up to `count` points without materializing them.
    fn skip(&mut self, count: u64) -> Result<u64, StageError>;

    fn at_end(&self) -> bool;

    /// Number of points consumed (read or skipped) so far.
    fn index(&self) -> u64;
}

pub type CursorBox<'a> = Box<dyn SequentialCursor + 'a>;

impl<T> SequentialCursor for Box<T>
where
    T: SequentialCursor + ?Sized,
{
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError> {
        self.as_mut().read(buffer)
    }

    fn skip(&mut self, count: u64) -> Result<u64, StageError> {
        self.as_mut().skip(count)
    }

    fn at_end(&self) -> bool {
        self.as_ref().at_end()
    }

    fn index(&self) -> u64 {
        self.as_ref().index()
    }
}

impl<T> SequentialCursor for &mut T
where
    T: SequentialCursor + ?Sized,
{
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError> {
        (**self).read(buffer)
    }

    fn skip(&mut self, count: u64) -> Result<u64, StageError> {
        (**self).skip(count)
    }

    fn at_end(&self) -> bool {
        (**self).at_end()
    }

    fn index(&self) -> u64 {
        (**self).index()
    }
}

/// Drain a cursor into owned rows, reading `chunk_size` points at a time.
pub fn collect_points(
    cursor: &mut dyn SequentialCursor,
    schema: &Schema,
    chunk_size: usize,
) -> Result<Vec<Vec<f64>>, StageError> {
    if chunk_size == 0 {
        return Err(StageError::invalid_argument(
            ErrorOrigin::Cursor,
            "chunk size must be greater than zero",
        ));
    }

    let mut buffer = PointBuffer::new(schema.clone(), chunk_size);
    let mut out = Vec::new();
    loop {
        buffer.clear();
        let read = cursor.read(&mut buffer)?;
        out.extend(buffer.iter().map(<[f64]>::to_vec));

        if read == 0 || cursor.at_end() {
            break;
        }
    }

    Ok(out)
}
