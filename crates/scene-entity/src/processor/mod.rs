//! Document processors
//!
//! A processor applies one parsed document to an [`EntityStore`] and reports
//! the document-level metadata it found:
//! - entity packets are merged into the store (or removed on `delete`)
//! - the document packet yields a [`DocumentHeader`]
//!
//! The header's clock is validated here, at parse time. Consumers copy it
//! without re-checking it.

use crate::error::ProcessResult;
use crate::store::EntityStore;
use scene_time::{ClockRange, ClockStep, Timestamp};
use serde_json::Value;

mod packet;

pub use packet::PacketProcessor;

/// Id of the packet carrying document-level metadata
pub const DOCUMENT_PACKET_ID: &str = "document";

/// Clock block declared by a document
///
/// All six fields are populated; defaults for omitted ones are filled in by
/// the processor that parsed the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentClock {
    /// Start of playback
    pub start_time: Timestamp,
    /// End of playback
    pub stop_time: Timestamp,
    /// Initial current time
    pub current_time: Timestamp,
    /// Behavior at the ends of the range
    pub range: ClockRange,
    /// Advance policy
    pub step: ClockStep,
    /// Playback rate
    pub multiplier: f64,
}

/// Document-level metadata found while processing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentHeader {
    /// Name declared by the document
    pub name: Option<String>,
    /// Clock declared by the document
    pub clock: Option<DocumentClock>,
}

/// Applies parsed documents to an entity store
///
/// Implement this trait to support another document grammar.
pub trait DocumentProcessor: Send + Sync + 'static {
    /// Apply `document` to `store`
    ///
    /// `source` identifies where the document came from, when known.
    ///
    /// # Errors
    /// Returns an error on malformed input. The store keeps whatever changes
    /// were applied before the failure.
    fn process(
        &self,
        document: &Value,
        store: &mut EntityStore,
        source: Option<&str>,
    ) -> ProcessResult<DocumentHeader>;
}
