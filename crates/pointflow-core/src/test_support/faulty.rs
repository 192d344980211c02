use crate::{
    buffer::PointBuffer,
    error::{ErrorOrigin, StageError},
    stage::{CursorBox, MemoryCursor, MemoryStage, SequentialCursor, Stage, StageProperties},
};
use std::sync::atomic::{AtomicUsize, Ordering};

///
/// FaultMode
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum FaultMode {
    /// Serves every point; only cursor releases are tracked.
    Never,
    /// `create_cursor` always fails.
    OpenFails,
    /// The cursor fails once its index reaches this position.
    ReadFailsAt(u64),
}

///
/// FaultyStage
///
/// Test-only stage that serves a memory stage's points and injects one fault.
/// Counts how many of its cursors have been dropped.
///

pub(crate) struct FaultyStage {
    inner: MemoryStage,
    mode: FaultMode,
    released: AtomicUsize,
}

impl FaultyStage {
    #[must_use]
    pub(crate) const fn new(inner: MemoryStage, mode: FaultMode) -> Self {
        Self {
            inner,
            mode,
            released: AtomicUsize::new(0),
        }
    }

    /// Number of cursors handed out by this stage that were dropped.
    #[must_use]
    pub(crate) fn released_cursors(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Stage for FaultyStage {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn properties(&self) -> &StageProperties {
        self.inner.properties()
    }

    fn create_cursor(&self) -> Result<CursorBox<'_>, StageError> {
        match self.mode {
            FaultMode::OpenFails => Err(StageError::internal(
                ErrorOrigin::Stage,
                "forced open failure",
            )),
            FaultMode::Never => Ok(Box::new(FaultyCursor {
                inner: self.inner.cursor(),
                fail_at: u64::MAX,
                released: &self.released,
            })),
            FaultMode::ReadFailsAt(fail_at) => Ok(Box::new(FaultyCursor {
                inner: self.inner.cursor(),
                fail_at,
                released: &self.released,
            })),
        }
    }
}

struct FaultyCursor<'a> {
    inner: MemoryCursor<'a>,
    fail_at: u64,
    released: &'a AtomicUsize,
}

impl Drop for FaultyCursor<'_> {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl FaultyCursor<'_> {
    fn check(&self) -> Result<(), StageError> {
        if self.inner.index() >= self.fail_at {
            return Err(StageError::internal(
                ErrorOrigin::Stage,
                "forced read failure",
            ));
        }

        Ok(())
    }
}

impl SequentialCursor for FaultyCursor<'_> {
    // Serves points one at a time so the fault lands exactly at `fail_at`.
    fn read(&mut self, buffer: &mut PointBuffer) -> Result<usize, StageError> {
        let mut written = 0;
        while !buffer.is_full() && !self.inner.at_end() {
            self.check()?;
            let mut single = PointBuffer::new(buffer.schema().clone(), 1);
            self.inner.read(&mut single)?;
            for point in single.iter() {
                buffer.push(point)?;
            }
            written += 1;
        }

        Ok(written)
    }

    fn skip(&mut self, count: u64) -> Result<u64, StageError> {
        self.check()?;
        self.inner.skip(count)
    }

    fn at_end(&self) -> bool {
        self.inner.at_end()
    }

    fn index(&self) -> u64 {
        self.inner.index()
    }
}
