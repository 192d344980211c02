//! Metrics sink boundary.
//!
//! All instrumentation flows through MetricsEvent and MetricsSink; this
//! module is the only bridge between pipeline logic and counter state.
use crate::{error::ErrorClass, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    MosaicBuilt {
        stages: u64,
        points: u64,
    },
    UpstreamOpened {
        stage_index: usize,
    },
    UpstreamExhausted {
        stage_index: usize,
        points: u64,
    },
    PointsRead {
        points: u64,
    },
    PointsSkipped {
        points: u64,
    },
    CursorFailed {
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::MosaicBuilt { stages, .. } => {
                m.ops.mosaics_built = m.ops.mosaics_built.saturating_add(1);
                m.ops.upstream_stages_merged = m.ops.upstream_stages_merged.saturating_add(stages);
            }
            MetricsEvent::UpstreamOpened { .. } => {
                m.ops.upstream_cursors_opened = m.ops.upstream_cursors_opened.saturating_add(1);
            }
            MetricsEvent::UpstreamExhausted { .. } => {
                m.ops.upstream_cursors_exhausted =
                    m.ops.upstream_cursors_exhausted.saturating_add(1);
            }
            MetricsEvent::PointsRead { points } => {
                m.ops.points_read = m.ops.points_read.saturating_add(points);
            }
            MetricsEvent::PointsSkipped { points } => {
                m.ops.points_skipped = m.ops.points_skipped.saturating_add(points);
            }
            MetricsEvent::CursorFailed { .. } => {
                m.ops.cursor_failures = m.ops.cursor_failures.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit path, unwinding included.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
