use crate::{
    error::ErrorClass,
    obs::{
        MetricsEvent, MetricsSink, metrics_report, metrics_reset_all,
        sink::{self, with_metrics_sink},
    },
    test_support::RecordingSink,
};
use std::rc::Rc;

#[test]
fn global_sink_accumulates_counters() {
    metrics_reset_all();

    sink::record(MetricsEvent::MosaicBuilt {
        stages: 3,
        points: 12,
    });
    sink::record(MetricsEvent::PointsRead { points: 5 });
    sink::record(MetricsEvent::PointsRead { points: 7 });
    sink::record(MetricsEvent::CursorFailed {
        class: ErrorClass::UpstreamReadFailure,
    });

    let report = metrics_report();
    assert_eq!(report.ops.mosaics_built, 1);
    assert_eq!(report.ops.upstream_stages_merged, 3);
    assert_eq!(report.ops.points_read, 12);
    assert_eq!(report.ops.cursor_failures, 1);

    metrics_reset_all();
    assert_eq!(metrics_report(), crate::obs::EventReport::default());
}

#[test]
fn override_captures_events_and_bypasses_global_state() {
    metrics_reset_all();
    let recording = Rc::new(RecordingSink::default());

    with_metrics_sink(recording.clone(), || {
        sink::record(MetricsEvent::PointsSkipped { points: 4 });
    });

    assert_eq!(
        recording.events(),
        vec![MetricsEvent::PointsSkipped { points: 4 }]
    );
    assert_eq!(
        metrics_report().ops.points_skipped,
        0,
        "overridden events must not reach the global sink"
    );
}

#[test]
fn override_is_restored_after_panic() {
    struct NullSink;
    impl MetricsSink for NullSink {
        fn record(&self, _event: MetricsEvent) {}
    }

    metrics_reset_all();
    let result = std::panic::catch_unwind(|| {
        with_metrics_sink(Rc::new(NullSink), || panic!("boom"));
    });
    assert!(result.is_err());

    sink::record(MetricsEvent::PointsRead { points: 1 });
    assert_eq!(
        metrics_report().ops.points_read,
        1,
        "global sink must be active again once the override scope unwinds"
    );
}

#[test]
fn report_serializes_to_json() {
    metrics_reset_all();
    sink::record(MetricsEvent::UpstreamOpened { stage_index: 0 });

    let json = serde_json::to_value(metrics_report()).expect("report should serialize");
    assert_eq!(json["ops"]["upstream_cursors_opened"], 1);
}
