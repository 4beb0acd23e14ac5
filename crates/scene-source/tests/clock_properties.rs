//! Property tests for clock derivation

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use scene_entity::{Entity, EntityStore};
use scene_source::{derive_clock, SceneDataSource, SourceConfig};
use scene_time::{ClockRange, ClockStep, TimeInterval, TimeIntervalCollection};
use serde_json::json;

fn store_with(intervals: &[(i64, i64)]) -> EntityStore {
    let epoch = Utc.with_ymd_and_hms(2012, 8, 4, 0, 0, 0).unwrap();
    let mut store = EntityStore::new();
    for (i, &(offset, length)) in intervals.iter().enumerate() {
        let start = epoch + Duration::seconds(offset);
        let interval = TimeInterval::new(start, start + Duration::seconds(length)).unwrap();
        store.merge(
            Entity::new(format!("e{i}"))
                .with_availability(TimeIntervalCollection::from_intervals([interval])),
        );
    }
    store
}

proptest! {
    #[test]
    fn derived_clock_spans_availability(
        intervals in prop::collection::vec((0i64..86_400, 60i64..86_400), 1..8)
    ) {
        let store = store_with(&intervals);
        let availability = store.compute_availability();
        let clock = derive_clock(&store, None, &SourceConfig::default()).unwrap();

        prop_assert_eq!(clock.start_time(), availability.start);
        prop_assert_eq!(clock.stop_time(), availability.stop);
        prop_assert_eq!(clock.current_time(), availability.start);
        prop_assert_eq!(clock.range(), ClockRange::LoopStop);
        prop_assert_eq!(clock.step(), ClockStep::SystemClockMultiplier);

        let expected = (availability.duration_seconds() / 120.0).round().max(1.0);
        prop_assert_eq!(clock.multiplier(), expected);
    }

    #[test]
    fn merge_keeps_every_entity(
        first in prop::collection::btree_set("[a-z]{1,6}", 0..6),
        second in prop::collection::btree_set("[a-z]{1,6}", 0..6),
    ) {
        let mut source = SceneDataSource::new();
        let packets = |ids: &std::collections::BTreeSet<String>| {
            json!(ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>())
        };
        source.process(&packets(&first), None).unwrap();
        source.process(&packets(&second), None).unwrap();

        for id in first.iter().chain(second.iter()) {
            prop_assert!(source.entities().contains(id));
        }
        prop_assert_eq!(source.entities().len(), first.union(&second).count());
    }
}
