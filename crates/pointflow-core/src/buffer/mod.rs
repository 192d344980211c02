//! Module: buffer
//! Responsibility: caller-owned, fixed-capacity point storage that cursors fill.
//! Does not own: schema validation across stages.


use crate::{
    error::{ErrorOrigin, StageError},
    schema::Schema,
};

///
/// PointBuffer
///
/// Row-major point storage bound to one schema.
/// Every point occupies `schema.dimension_count()` consecutive values, and the
/// buffer never grows past the capacity it was created with.
///

#[derive(Clone, Debug)]
pub struct PointBuffer {
    schema: Schema,
    capacity: usize,
    len: usize,
    values: Vec<f64>,
}

impl PointBuffer {
    #[must_use]
    pub fn new(schema: Schema, capacity: usize) -> Self {
        let values = Vec::with_capacity(capacity.saturating_mul(schema.dimension_count()));

        Self {
            schema,
            capacity,
            len: 0,
            values,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points currently stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of points that still fit.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.len)
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Append one point.
    pub fn push(&mut self, point: &[f64]) -> Result<(), StageError> {
        if point.len() != self.stride() {
            return Err(StageError::invalid_argument(
                ErrorOrigin::Buffer,
                format!(
                    "point arity mismatch: schema has {} dimensions, point has {}",
                    self.stride(),
                    point.len()
                ),
            ));
        }
        if self.is_full() {
            return Err(StageError::invalid_argument(
                ErrorOrigin::Buffer,
                format!("point buffer is full (capacity {})", self.capacity),
            ));
        }

        self.values.extend_from_slice(point);
        self.len += 1;

        Ok(())
    }

    /// Return the point at `index`, if stored.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        if index >= self.len {
            return None;
        }
        let stride = self.stride();
        let start = index.checked_mul(stride)?;
        let end = start.checked_add(stride)?;

        self.values.get(start..end)
    }

    /// Value of one named dimension of one point.
    #[must_use]
    pub fn value(&self, index: usize, dimension: &str) -> Option<f64> {
        let position = self.schema.position_of(dimension)?;

        self.point(index).map(|point| point[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.len).filter_map(|index| self.point(index))
    }

    /// Drop every stored point, keeping schema and capacity.
    pub fn clear(&mut self) {
        self.values.clear();
        self.len = 0;
    }

    /// Copy stored points out as owned rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }

    fn stride(&self) -> usize {
        self.schema.dimension_count()
    }
}
