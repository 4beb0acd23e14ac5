//! JSON packet processor
//!
//! A document is one packet object or an array of them. Every packet has a
//! string `id`; the packet whose id is [`DOCUMENT_PACKET_ID`] carries
//! document metadata instead of an entity.
//!
//! ```json
//! [
//!   {"id": "document", "name": "demo", "clock": {
//!       "interval": "2012-08-04T16:00:00Z/2012-08-04T18:00:00Z",
//!       "multiplier": 60, "range": "CLAMPED"}},
//!   {"id": "sat", "availability": "2012-08-04T16:00:00Z/2012-08-04T17:00:00Z"},
//!   {"id": "old", "delete": true}
//! ]
//! ```

use super::{DocumentClock, DocumentHeader, DocumentProcessor, DOCUMENT_PACKET_ID};
use crate::entity::Entity;
use crate::error::{ProcessError, ProcessResult};
use crate::store::EntityStore;
use scene_time::{parse_timestamp, ClockRange, ClockStep, TimeInterval, TimeIntervalCollection};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Clock block as written in a document packet
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClockPacket {
    interval: String,
    current_time: Option<String>,
    multiplier: Option<f64>,
    range: Option<ClockRange>,
    step: Option<ClockStep>,
}

impl ClockPacket {
    fn into_clock(self) -> ProcessResult<DocumentClock> {
        let interval: TimeInterval = self
            .interval
            .parse()
            .map_err(|e| ProcessError::InvalidClock(format!("interval: {e}")))?;
        let current_time = match self.current_time.as_deref() {
            Some(text) => parse_timestamp(text)
                .map_err(|e| ProcessError::InvalidClock(format!("currentTime: {e}")))?,
            None => interval.start,
        };
        Ok(DocumentClock {
            start_time: interval.start,
            stop_time: interval.stop,
            current_time,
            range: self.range.unwrap_or(ClockRange::LoopStop),
            step: self.step.unwrap_or(ClockStep::SystemClockMultiplier),
            multiplier: self.multiplier.unwrap_or(1.0),
        })
    }
}

/// Default processor for JSON packet documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PacketProcessor;

impl PacketProcessor {
    /// Create new packet processor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn process_packet(
        index: usize,
        packet: &Value,
        store: &mut EntityStore,
        header: &mut DocumentHeader,
    ) -> ProcessResult<()> {
        let fields = packet
            .as_object()
            .ok_or_else(|| ProcessError::invalid_packet(index, "packet is not an object"))?;
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .ok_or(ProcessError::MissingId { index })?;

        if id == DOCUMENT_PACKET_ID {
            return Self::process_document_packet(index, fields, header);
        }

        if fields.get("delete").and_then(Value::as_bool) == Some(true) {
            if store.remove(id).is_none() {
                tracing::debug!(id, "delete packet for unknown entity");
            }
            return Ok(());
        }

        store.merge(Self::entity_from_packet(index, id, fields)?);
        Ok(())
    }

    fn process_document_packet(
        index: usize,
        fields: &Map<String, Value>,
        header: &mut DocumentHeader,
    ) -> ProcessResult<()> {
        match fields.get("name") {
            Some(Value::String(name)) => header.name = Some(name.clone()),
            Some(Value::Null) | None => {}
            Some(_) => return Err(ProcessError::invalid_packet(index, "name must be a string")),
        }

        if let Some(clock) = fields.get("clock") {
            let packet: ClockPacket = serde_json::from_value(clock.clone())
                .map_err(|e| ProcessError::InvalidClock(e.to_string()))?;
            header.clock = Some(packet.into_clock()?);
        }
        Ok(())
    }

    fn entity_from_packet(
        index: usize,
        id: &str,
        fields: &Map<String, Value>,
    ) -> ProcessResult<Entity> {
        let mut entity = Entity::new(id);
        for (key, value) in fields {
            match key.as_str() {
                "id" | "delete" => {}
                "name" => match value {
                    Value::String(name) => entity = entity.with_name(name.clone()),
                    Value::Null => {}
                    _ => return Err(ProcessError::invalid_packet(index, "name must be a string")),
                },
                "availability" => {
                    entity = entity.with_availability(parse_availability(index, id, value)?);
                }
                _ => entity = entity.with_property(key.clone(), value.clone()),
            }
        }
        Ok(entity)
    }
}

impl DocumentProcessor for PacketProcessor {
    fn process(
        &self,
        document: &Value,
        store: &mut EntityStore,
        source: Option<&str>,
    ) -> ProcessResult<DocumentHeader> {
        let packets = match document {
            Value::Array(packets) => packets.as_slice(),
            Value::Object(_) => std::slice::from_ref(document),
            other => {
                return Err(ProcessError::InvalidDocument(format!(
                    "expected a packet or an array of packets, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut header = DocumentHeader::default();
        for (index, packet) in packets.iter().enumerate() {
            Self::process_packet(index, packet, store, &mut header)?;
        }

        tracing::debug!(
            source = source.unwrap_or("<inline>"),
            packets = packets.len(),
            entities = store.len(),
            "processed document"
        );
        Ok(header)
    }
}

/// Parse `availability` as one interval string or an array of them
fn parse_availability(index: usize, id: &str, value: &Value) -> ProcessResult<TimeIntervalCollection> {
    let parse = |text: &str| {
        text.parse::<TimeInterval>()
            .map_err(|source| ProcessError::InvalidAvailability {
                id: id.to_string(),
                source,
            })
    };

    match value {
        Value::String(text) => Ok(TimeIntervalCollection::from_intervals([parse(text)?])),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    ProcessError::invalid_packet(index, "availability entries must be strings")
                })
                .and_then(parse)
            })
            .collect(),
        _ => Err(ProcessError::invalid_packet(
            index,
            "availability must be a string or an array of strings",
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
