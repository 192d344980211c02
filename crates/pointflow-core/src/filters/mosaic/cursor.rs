use crate::{
    buffer::PointBuffer,
    error::{ErrorClass, ErrorOrigin, StageError},
    obs::{MetricsEvent, sink},
    stage::{CursorBox, SequentialCursor, Stage},
};
use std::fmt;

///
/// CursorState
///
/// Traversal position of a `MosaicCursor`.
/// `Exhausted` and `Failed` are terminal.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorState {
    NotStarted,
    Reading(usize),
    Exhausted,
    Failed(ErrorClass),
}

///
/// MosaicCursor
///
/// Pull-based concatenation of the upstream stages' own cursors, in upstream
/// order. At most one upstream cursor is open at a time; it is opened on
/// demand and dropped as soon as it reports exhaustion.
///
/// `index()` is one flat position across the whole merged sequence: points
/// consumed by released upstream cursors plus the open cursor's own index.
///

pub struct MosaicCursor<'a> {
    stages: &'a [&'a dyn Stage],
    state: CursorState,
    current: Option<CursorBox<'a>>,
    consumed: u64,
}

impl<'a> MosaicCursor<'a> {
    #[must_use]
    pub(crate) const fn new(stages: &'a [&'a dyn Stage]) -> Self {
        Self {
            stages,
            state: CursorState::NotStarted,
            current: None,
            consumed: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> CursorState {
        self.state
    }

    // Make sure the cursor of the current upstream stage is open.
    // Returns the stage index, or None once every upstream stage is drained.
    fn ensure_open(&mut self) -> Result<Option<usize>, StageError> {
        loop {
            match self.state {
                CursorState::NotStarted => {
                    self.state = if self.stages.is_empty() {
                        CursorState::Exhausted
                    } else {
                        CursorState::Reading(0)
                    };
                }
                CursorState::Reading(stage_index) => {
                    if self.current.is_some() {
                        return Ok(Some(stage_index));
                    }

                    let stage: &'a dyn Stage = self.stages[stage_index];
                    let cursor = stage
                        .create_cursor()
                        .map_err(|err| self.fail(StageError::upstream_open(stage_index, err)))?;

                    tracing::trace!(stage_index, stage = stage.name(), "opened upstream cursor");
                    sink::record(MetricsEvent::UpstreamOpened { stage_index });
                    self.current = Some(cursor);

                    return Ok(Some(stage_index));
                }
                CursorState::Exhausted => return Ok(None),
                CursorState::Failed(class) => return Err(StageError::cursor_terminated(class)),
            }
        }
    }

    fn current_mut(&mut self) -> Result<&mut CursorBox<'a>, StageError> {
        self.current.as_mut().ok_or_else(|| {
            StageError::internal(
                ErrorOrigin::Cursor,
                "mosaic cursor has no open upstream cursor while reading",
            )
        })
    }

    fn current_at_end(&self) -> bool {
        self.current.as_ref().is_some_and(|cursor| cursor.at_end())
    }

    // Drop the open upstream cursor and move on to the next stage.
    fn release_current(&mut self, stage_index: usize) {
        if let Some(cursor) = self.current.take() {
            let points = cursor.index();
            self.consumed = self.consumed.saturating_add(points);

            tracing::trace!(stage_index, points, "upstream cursor exhausted");
            sink::record(MetricsEvent::UpstreamExhausted {
                stage_index,
                points,
            });
        }

        let next = stage_index + 1;
        self.state = if next < self.stages.len() {
            CursorState::Reading(next)
        } else {
            CursorState::Exhausted
        };
    }

    // Enter the terminal failed state and hand the error back.
    // Points the dropped upstream cursor already delivered stay counted.
    fn fail(&mut self, err: StageError) -> StageError {
        self.state = CursorState::Failed(err.class);
        if let Some(cursor) = self.current.take() {
            self.consumed = self.consumed.saturating_add(cursor.index());
        }

        tracing::warn!(error = %err.display_with_class(), "mosaic cursor failed");
        sink::record(MetricsEvent::CursorFailed { class: err.class });

        err
    }

    // A buffer laid out for another schema is a caller error; the cursor stays usable.
    fn check_buffer(&self, buffer: &PointBuffer) -> Result<(), StageError> {
        match self.stages.first() {
            Some(stage) if stage.schema() != buffer.schema() => Err(
                StageError::buffer_schema_mismatch(stage.schema(), buffer.schema()),
            ),
            _ => Ok(()),
        }
    }

    fn check_not_failed(&self) -> Result<(), StageError> {
        if let CursorState::Failed(class) = self.state {
            return Err(StageError::cursor_terminated(class));
        }

        Ok(())
    }
}

impl SequentialCursor for MosaicCursor<'_> {
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError> {
        self.check_not_failed()?;
        self.check_buffer(buffer)?;

        let mut written = 0;
        while !buffer.is_full() {
            let Some(stage_index) = self.ensure_open()? else {
                break;
            };

            let step = self.current_mut()?.read(buffer);
            let read = step.map_err(|err| self.fail(StageError::upstream_read(stage_index, err)))?;
            written += read;

            // A zero-point read with room left means the upstream has nothing more.
            if read == 0 || self.current_at_end() {
                self.release_current(stage_index);
            }
        }

        if written > 0 {
            sink::record(MetricsEvent::PointsRead {
                points: written as u64,
            });
        }

        Ok(written)
    }

    fn skip(&mut self, count: u64) -> Result<u64, StageError> {
        self.check_not_failed()?;

        let mut skipped: u64 = 0;
        while skipped < count {
            let Some(stage_index) = self.ensure_open()? else {
                break;
            };

            let step = self.current_mut()?.skip(count - skipped);
            let advanced =
                step.map_err(|err| self.fail(StageError::upstream_read(stage_index, err)))?;
            skipped = skipped.saturating_add(advanced);

            if advanced == 0 || self.current_at_end() {
                self.release_current(stage_index);
            }
        }

        if skipped > 0 {
            sink::record(MetricsEvent::PointsSkipped { points: skipped });
        }

        Ok(skipped)
    }

    fn at_end(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }

    fn index(&self) -> u64 {
        let local = self.current.as_ref().map_or(0, |cursor| cursor.index());

        self.consumed.saturating_add(local)
    }
}

impl fmt::Debug for MosaicCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MosaicCursor")
            .field("stages", &self.stages.len())
            .field("state", &self.state)
            .field("index", &self.index())
            .finish_non_exhaustive()
    }
}
