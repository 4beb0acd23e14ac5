use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use scene_source::{SceneDataSource, SourceError};
use scene_test_utils::{
    document_packet_with_clock, entity_packet, init_tracing, scene, static_packet,
};
use scene_time::{parse_timestamp, ClockRange, ClockStep, MINIMUM_TIME};
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn document_clock_is_copied_verbatim() {
    init_tracing();
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([
                document_packet_with_clock(json!({
                    "interval": "2012-08-04T16:00:00Z/2012-08-04T18:00:00Z",
                    "currentTime": "2012-08-04T19:00:00Z",
                    "multiplier": -10,
                    "range": "UNBOUNDED",
                    "step": "SYSTEM_CLOCK"
                })),
                entity_packet("sat", "2000-01-01T00:00:00Z/2000-01-02T00:00:00Z"),
            ]),
            Some("clocked.json"),
        )
        .unwrap();

    let clock = source.clock().unwrap();
    assert_eq!(clock.start_time(), parse_timestamp("2012-08-04T16:00:00Z").unwrap());
    assert_eq!(clock.stop_time(), parse_timestamp("2012-08-04T18:00:00Z").unwrap());
    // Outside [start, stop], still taken as declared.
    assert_eq!(clock.current_time(), parse_timestamp("2012-08-04T19:00:00Z").unwrap());
    assert_eq!(clock.multiplier(), -10.0);
    assert_eq!(clock.range(), ClockRange::Unbounded);
    assert_eq!(clock.step(), ClockStep::SystemClock);
}

#[test]
fn clock_derived_from_availability() {
    init_tracing();
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([
                entity_packet("a", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z"),
                entity_packet("b", "2012-08-04T16:30:00Z/2012-08-04T18:00:00Z"),
            ]),
            None,
        )
        .unwrap();

    let start = parse_timestamp("2012-08-04T16:00:00Z").unwrap();
    let clock = source.clock().unwrap();
    assert_eq!(clock.start_time(), start);
    assert_eq!(clock.stop_time(), parse_timestamp("2012-08-04T18:00:00Z").unwrap());
    assert_eq!(clock.current_time(), start);
    assert_eq!(clock.range(), ClockRange::LoopStop);
    assert_eq!(clock.step(), ClockStep::SystemClockMultiplier);
    assert_eq!(clock.multiplier(), 60.0);
}

#[test]
fn unbounded_availability_yields_no_clock() {
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([
                entity_packet("a", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z"),
                static_packet("ground"),
            ]),
            None,
        )
        .unwrap();

    assert_eq!(source.entities().compute_availability().start, MINIMUM_TIME);
    assert!(source.clock().is_none());
}

#[test]
fn clock_is_replaced_not_merged() {
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([entity_packet("a", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z")]),
            None,
        )
        .unwrap();
    assert!(source.clock().is_some());

    source.process(&scene([static_packet("ground")]), None).unwrap();
    assert!(source.clock().is_none());
}

#[test]
fn replace_with_empty_document_clears_everything() {
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([entity_packet("a", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z")]),
            None,
        )
        .unwrap();
    assert!(source.clock().is_some());

    source.load(&json!([]), None).unwrap();
    assert!(source.entities().is_empty());
    assert!(source.clock().is_none());
}

#[test]
fn merge_twice_unions_entities() {
    let mut source = SceneDataSource::new();
    source
        .process(
            &scene([entity_packet("a", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z")]),
            None,
        )
        .unwrap();
    source
        .process(
            &scene([entity_packet("b", "2012-08-05T16:00:00Z/2012-08-05T17:00:00Z")]),
            None,
        )
        .unwrap();

    let ids: Vec<_> = source.entities().ids().collect();
    assert_eq!(ids, vec!["a", "b"]);

    let availability = source.entities().compute_availability();
    assert_eq!(availability.start, parse_timestamp("2012-08-04T16:00:00Z").unwrap());
    assert_eq!(availability.stop, parse_timestamp("2012-08-05T17:00:00Z").unwrap());
    assert_eq!(source.clock().unwrap().stop_time(), availability.stop);
}

#[test]
fn replace_discards_previous_entities() {
    let mut source = SceneDataSource::new();
    source
        .process(&scene([static_packet("old")]), None)
        .unwrap();
    source
        .load(
            &scene([entity_packet("new", "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z")]),
            None,
        )
        .unwrap();

    assert!(!source.entities().contains("old"));
    assert!(source.entities().contains("new"));
    assert!(source.clock().is_some());
}

#[test]
fn name_derived_once_from_source() {
    let mut source = SceneDataSource::new();
    source
        .process(&scene([static_packet("a")]), Some("http://host/path/scene.czml"))
        .unwrap();
    assert_eq!(source.name(), Some("scene.czml"));

    source
        .load(&scene([static_packet("b")]), Some("http://host/path/other.czml"))
        .unwrap();
    assert_eq!(source.name(), Some("scene.czml"));
}

#[test]
fn missing_document_fails_before_mutation() {
    let mut source = SceneDataSource::new();
    source.process(&scene([static_packet("keep")]), None).unwrap();

    let changed = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&changed);
    source.on_changed(move |_| *counter.lock() += 1);

    let err = source.load(&Value::Null, Some("http://host/x.json")).unwrap_err();
    assert!(err.is_invalid_argument());
    let err = source.process(&Value::Null, None).unwrap_err();
    assert!(matches!(err, SourceError::InvalidArgument("document")));

    assert!(source.entities().contains("keep"));
    assert_eq!(source.name(), None);
    assert_eq!(*changed.lock(), 0);
}

#[test]
fn processing_failure_propagates_without_error_event() {
    let mut source = SceneDataSource::new();
    let errors = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&errors);
    source.on_error(move |_, _| *counter.lock() += 1);

    let err = source
        .process(&json!([{"id": "a"}, {"no-id": true}]), None)
        .unwrap_err();
    assert!(matches!(err, SourceError::Process(_)));
    assert_eq!(*errors.lock(), 0);
    // Not rolled back
    assert!(source.entities().contains("a"));
}

#[test]
fn changed_listeners_run_in_registration_order() {
    let mut source = SceneDataSource::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        let log = Arc::clone(&log);
        source.on_changed(move |source| {
            log.lock().push((tag, source.entities().len()));
        });
    }

    source.process(&scene([static_packet("a")]), None).unwrap();
    assert_eq!(
        *log.lock(),
        vec![("first", 1), ("second", 1), ("third", 1)]
    );
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let mut source = SceneDataSource::new();
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let id = source.on_changed(move |_| *counter.lock() += 1);

    source.process(&scene([static_packet("a")]), None).unwrap();
    assert!(source.remove_changed_listener(id));
    source.process(&scene([static_packet("b")]), None).unwrap();

    assert_eq!(*calls.lock(), 1);
}

#[test]
fn delete_packets_remove_entities_on_merge() {
    let mut source = SceneDataSource::new();
    source
        .process(&scene([static_packet("a"), static_packet("b")]), None)
        .unwrap();
    source
        .process(&json!([{"id": "a", "delete": true}]), None)
        .unwrap();

    assert_eq!(source.entities().ids().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn time_varying_is_fixed() {
    let mut source = SceneDataSource::new();
    assert!(source.is_time_varying());
    source.process(&scene([static_packet("a")]), None).unwrap();
    assert!(source.is_time_varying());
}
