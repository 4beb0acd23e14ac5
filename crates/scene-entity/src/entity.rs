//! Time-dynamic entities
//!
//! An entity's property values are kept as raw JSON; interpreting them is
//! left to consumers. Only identity, name and availability are typed here.

use scene_time::{TimeInterval, TimeIntervalCollection, Timestamp};
use serde_json::{Map, Value};

/// Object whose properties are defined over simulation time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    id: String,
    name: Option<String>,
    availability: Option<TimeIntervalCollection>,
    properties: Map<String, Value>,
}

impl Entity {
    /// Create entity with no name, availability or properties
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With availability
    #[inline]
    #[must_use]
    pub fn with_availability(mut self, availability: TimeIntervalCollection) -> Self {
        self.availability = Some(availability);
        self
    }

    /// With a raw property value
    #[inline]
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Unique id within a store
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared availability; `None` means defined at all times
    #[inline]
    #[must_use]
    pub fn availability(&self) -> Option<&TimeIntervalCollection> {
        self.availability.as_ref()
    }

    /// Span over which this entity has data
    ///
    /// Entities without a declared (or with an empty) availability span all
    /// of time.
    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        self.availability
            .as_ref()
            .and_then(TimeIntervalCollection::bounds)
            .unwrap_or(TimeInterval::UNBOUNDED)
    }

    /// Check if the entity has data at `time`
    #[must_use]
    pub fn is_available(&self, time: Timestamp) -> bool {
        self.availability
            .as_ref()
            .map_or(true, |a| a.contains(time))
    }

    /// Raw property value
    #[inline]
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// All raw properties
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Merge a newer definition of the same entity into this one
    ///
    /// Name and availability are replaced only when `update` declares them.
    /// Properties merge key by key; nested objects merge recursively and
    /// anything else is overwritten.
    pub fn merge(&mut self, update: Entity) {
        debug_assert_eq!(self.id, update.id);
        if update.name.is_some() {
            self.name = update.name;
        }
        if update.availability.is_some() {
            self.availability = update.availability;
        }
        for (key, value) in update.properties {
            let entry = self.properties.entry(key).or_insert(Value::Null);
            *entry = merge_values(std::mem::take(entry), value);
        }
    }
}

/// Merge two JSON values recursively; `update` wins on conflicts
fn merge_values(base: Value, update: Value) -> Value {
    match (base, update) {
        (Value::Object(mut base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                let entry = base_map.entry(key).or_insert(Value::Null);
                *entry = merge_values(std::mem::take(entry), value);
            }
            Value::Object(base_map)
        }
        (_, update) => update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn interval(s: &str) -> TimeInterval {
        s.parse().unwrap()
    }

    #[test]
    fn entity_without_availability_is_unbounded() {
        let entity = Entity::new("a");
        assert_eq!(entity.interval(), TimeInterval::UNBOUNDED);
        assert!(entity.is_available(scene_time::MINIMUM_TIME));
    }

    #[test]
    fn entity_interval_spans_availability() {
        let entity = Entity::new("a").with_availability(TimeIntervalCollection::from_intervals([
            interval("2000-01-01T00:00:00Z/2000-01-02T00:00:00Z"),
            interval("2000-01-04T00:00:00Z/2000-01-05T00:00:00Z"),
        ]));
        assert_eq!(
            entity.interval(),
            interval("2000-01-01T00:00:00Z/2000-01-05T00:00:00Z")
        );
        let gap = scene_time::parse_timestamp("2000-01-03T00:00:00Z").unwrap();
        assert!(!entity.is_available(gap));
    }

    #[test]
    fn merge_keeps_undeclared_fields() {
        let mut entity = Entity::new("a")
            .with_name("first")
            .with_property("color", json!("red"));
        entity.merge(Entity::new("a").with_property("size", json!(3)));

        assert_eq!(entity.name(), Some("first"));
        assert_eq!(entity.property("color"), Some(&json!("red")));
        assert_eq!(entity.property("size"), Some(&json!(3)));
    }

    #[test]
    fn merge_nested_properties() {
        let mut entity = Entity::new("a").with_property(
            "billboard",
            json!({"image": "a.png", "scale": 1.0}),
        );
        entity.merge(
            Entity::new("a")
                .with_name("renamed")
                .with_property("billboard", json!({"scale": 2.0})),
        );

        assert_eq!(entity.name(), Some("renamed"));
        assert_eq!(
            entity.property("billboard"),
            Some(&json!({"image": "a.png", "scale": 2.0}))
        );
    }

    #[test]
    fn merge_replaces_availability() {
        let mut entity = Entity::new("a").with_availability(TimeIntervalCollection::from_intervals([
            interval("2000-01-01T00:00:00Z/2000-01-02T00:00:00Z"),
        ]));
        entity.merge(Entity::new("a").with_availability(TimeIntervalCollection::from_intervals([
            interval("2000-02-01T00:00:00Z/2000-02-02T00:00:00Z"),
        ])));
        assert_eq!(
            entity.interval(),
            interval("2000-02-01T00:00:00Z/2000-02-02T00:00:00Z")
        );
    }
}
