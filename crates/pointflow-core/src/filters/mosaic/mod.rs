//! Module: filters::mosaic
//! Responsibility: present N upstream stages with one schema as a single stage.
//! Does not own: upstream stages (borrowed) or schema reconciliation.
//! Boundary: construction validates and aggregates metadata; data only moves
//! through `MosaicCursor`.

mod cursor;


pub use cursor::{CursorState, MosaicCursor};

use crate::{
    bounds::Bounds,
    config::MosaicConfig,
    error::{ErrorOrigin, StageError},
    obs::{MetricsEvent, sink},
    stage::{CursorBox, Stage, StageProperties, collect_points},
};
use std::fmt;

///
/// MosaicFilter
///
/// Composite stage over an ordered, non-empty list of upstream stages that all
/// share one schema. Bounds are the union and the point count the sum of the
/// upstream metadata, both computed once at construction.
///
/// Upstream stages are borrowed; the pipeline owner keeps them alive for as
/// long as the filter and every cursor derived from it.
///

pub struct MosaicFilter<'a> {
    name: String,
    read_chunk_size: usize,
    properties: StageProperties,
    prev_stages: Vec<&'a dyn Stage>,
}

impl<'a> MosaicFilter<'a> {
    pub fn new(stages: Vec<&'a dyn Stage>) -> Result<Self, StageError> {
        Self::with_config(stages, &MosaicConfig::default())
    }

    pub fn with_config(
        stages: Vec<&'a dyn Stage>,
        config: &MosaicConfig,
    ) -> Result<Self, StageError> {
        Self::from_slots_with_config(stages.into_iter().map(Some).collect(), config)
    }

    /// Build from pipeline slots, where an unfilled slot is `None`.
    pub fn from_slots(slots: Vec<Option<&'a dyn Stage>>) -> Result<Self, StageError> {
        Self::from_slots_with_config(slots, &MosaicConfig::default())
    }

    pub fn from_slots_with_config(
        slots: Vec<Option<&'a dyn Stage>>,
        config: &MosaicConfig,
    ) -> Result<Self, StageError> {
        config.validate()?;

        if slots.is_empty() {
            return Err(StageError::invalid_argument(
                ErrorOrigin::Filter,
                "empty stage list passed to mosaic filter",
            ));
        }

        let mut prev_stages = Vec::with_capacity(slots.len());
        for (stage_index, slot) in slots.into_iter().enumerate() {
            let Some(stage) = slot else {
                return Err(StageError::invalid_argument(
                    ErrorOrigin::Filter,
                    format!("missing stage passed to mosaic filter at index {stage_index}"),
                ));
            };
            prev_stages.push(stage);
        }

        let properties = aggregate_properties(&prev_stages)?;

        tracing::debug!(
            name = %config.name,
            stages = prev_stages.len(),
            points = properties.point_count,
            bounds = %properties.bounds,
            "built mosaic filter"
        );
        sink::record(MetricsEvent::MosaicBuilt {
            stages: prev_stages.len() as u64,
            points: properties.point_count,
        });

        Ok(Self {
            name: config.name.clone(),
            read_chunk_size: config.read_chunk_size,
            properties,
            prev_stages,
        })
    }

    /// Upstream stages in traversal order.
    #[must_use]
    pub fn prev_stages(&self) -> &[&'a dyn Stage] {
        &self.prev_stages
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.prev_stages.len()
    }

    /// Open a cursor positioned at the first point of the first upstream stage.
    #[must_use]
    pub fn cursor(&self) -> MosaicCursor<'_> {
        MosaicCursor::new(self.prev_stages.as_slice())
    }

    /// Drain a fresh cursor into owned rows, `read_chunk_size` points per read.
    pub fn read_all(&self) -> Result<Vec<Vec<f64>>, StageError> {
        let mut cursor = self.cursor();

        collect_points(&mut cursor, self.schema(), self.read_chunk_size)
    }
}

// Every upstream schema must equal the first one exactly.
fn aggregate_properties(stages: &[&dyn Stage]) -> Result<StageProperties, StageError> {
    let Some(first) = stages.first() else {
        return Err(StageError::internal(
            ErrorOrigin::Filter,
            "mosaic aggregation requires at least one upstream stage",
        ));
    };
    let schema = first.schema();

    let mut bounds = Bounds::empty();
    let mut point_count: u64 = 0;
    for (stage_index, stage) in stages.iter().enumerate() {
        if stage.schema() != schema {
            return Err(StageError::upstream_schema_mismatch(
                stage_index,
                schema,
                stage.schema(),
            ));
        }

        bounds.grow(stage.bounds());
        point_count = point_count.saturating_add(stage.point_count());
    }

    Ok(StageProperties::new(schema.clone(), bounds, point_count))
}

impl Stage for MosaicFilter<'_> {
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

impl fmt::Debug for MosaicFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.prev_stages.iter().map(|stage| stage.name()).collect();

        f.debug_struct("MosaicFilter")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("prev_stages", &names)
            .finish()
    }
}
