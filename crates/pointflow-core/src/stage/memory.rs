use crate::{
    bounds::Bounds,
    buffer::PointBuffer,
    error::{ErrorOrigin, StageError},
    schema::Schema,
    stage::{CursorBox, SequentialCursor, Stage, StageProperties},
};

const POSITION_DIMENSIONS: [&str; 3] = ["X", "Y", "Z"];

///
/// MemoryStage
///
/// Leaf stage serving a materialized row vector in insertion order.
///

#[derive(Clone, Debug)]
pub struct MemoryStage {
    name: String,
    properties: StageProperties,
    rows: Vec<Vec<f64>>,
}

impl MemoryStage {
    /// Build a stage over `rows`; every row must match the schema's arity.
    /// Bounds are computed from the `X`/`Y`/`Z` dimensions, a missing axis reads as 0.
    pub fn new(
        name: impl Into<String>,
        schema: Schema,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, StageError> {
        let name = name.into();
        if let Some((row_index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != schema.dimension_count())
        {
            return Err(StageError::invalid_argument(
                ErrorOrigin::Stage,
                format!(
                    "stage '{name}' row {row_index} has {} values, schema has {} dimensions",
                    row.len(),
                    schema.dimension_count()
                ),
            ));
        }

        let bounds = compute_bounds(&schema, &rows);
        let point_count = rows.len() as u64;

        Ok(Self {
            name,
            properties: StageProperties::new(schema, bounds, point_count),
            rows,
        })
    }

    /// Replace the computed extent, e.g. with one taken from a file header.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.properties.bounds = bounds;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub const fn cursor(&self) -> MemoryCursor<'_> {
        MemoryCursor {
            stage: self,
            index: 0,
        }
    }
}

impl Stage for MemoryStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> &StageProperties {
        &self.properties
    }

    fn create_cursor(&self) -> Result<CursorBox<'_>, StageError> {
        Ok(Box::new(self.cursor()))
    }
}

fn compute_bounds(schema: &Schema, rows: &[Vec<f64>]) -> Bounds {
    let positions = POSITION_DIMENSIONS.map(|name| schema.position_of(name));
    if positions.iter().all(Option::is_none) {
        return Bounds::empty();
    }

    let mut bounds = Bounds::empty();
    for row in rows {
        bounds.grow_point(positions.map(|position| position.map_or(0.0, |p| row[p])));
    }

    bounds
}

///
/// MemoryCursor
///

#[derive(Debug)]
pub struct MemoryCursor<'a> {
    stage: &'a MemoryStage,
    index: usize,
}

impl MemoryCursor<'_> {
    fn remaining_rows(&self) -> usize {
        self.stage.rows.len().saturating_sub(self.index)
    }
}

impl SequentialCursor for MemoryCursor<'_> {
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError> {
        if buffer.schema() != self.stage.schema() {
            return Err(StageError::buffer_schema_mismatch(
                self.stage.schema(),
                buffer.schema(),
            ));
        }

        let count = buffer.remaining().min(self.remaining_rows());
        for row in &self.stage.rows[self.index..self.index + count] {
            buffer.push(row)?;
        }
        self.index += count;

        Ok(count)
    }

    fn skip(&mut self, count: u64) -> Result<u64, StageError> {
        let available = self.remaining_rows();
        let skipped = usize::try_from(count).map_or(available, |count| count.min(available));
        self.index += skipped;

        Ok(skipped as u64)
    }

    fn at_end(&self) -> bool {
        self.remaining_rows() == 0
    }

    fn index(&self) -> u64 {
        self.index as u64
    }
}
