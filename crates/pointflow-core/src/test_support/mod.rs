mod faulty;

pub(crate) use faulty::{FaultMode, FaultyStage};

use crate::{
    obs::{MetricsEvent, MetricsSink},
    schema::Schema,
    stage::MemoryStage,
};
use std::cell::RefCell;

/// Build an X/Y/Z stage holding exactly these points.
#[must_use]
pub(crate) fn xyz_stage(name: &str, points: &[[f64; 3]]) -> MemoryStage {
    MemoryStage::new(
        name,
        Schema::xyz(),
        points.iter().map(|point| point.to_vec()).collect(),
    )
    .expect("xyz fixture rows should match the xyz schema")
}

/// Build an X/Y/Z stage of `count` diagonal points starting at `start`.
/// Point `i` is `(start + i, start + i, start + i)`, so sequences are easy to compare.
#[must_use]
pub(crate) fn diagonal_stage(name: &str, start: f64, count: usize) -> MemoryStage {
    let points: Vec<[f64; 3]> = (0..count)
        .map(|i| {
            #[expect(clippy::cast_precision_loss)]
            let offset = start + i as f64;
            [offset; 3]
        })
        .collect();

    xyz_stage(name, &points)
}

/// Expected rows of `diagonal_stage(_, start, count)`.
#[must_use]
pub(crate) fn diagonal_rows(start: f64, count: usize) -> Vec<Vec<f64>> {
    diagonal_stage("expected", start, count).rows().to_vec()
}

///
/// RecordingSink
///
/// Test-only metrics sink that keeps every event in arrival order.
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.borrow().clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}
