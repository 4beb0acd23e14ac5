//! Error types for document processing

use scene_time::TimeError;

/// Errors raised while applying a document to an entity store
///
/// Processing is not transactional: packets before the failing one have
/// already been applied when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// Document root is neither a packet nor an array of packets
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Packet is malformed
    #[error("invalid packet at index {index}: {message}")]
    InvalidPacket { index: usize, message: String },

    /// Packet has no string `id`
    #[error("packet at index {index} has no id")]
    MissingId { index: usize },

    /// Entity availability could not be parsed
    #[error("invalid availability for entity '{id}': {source}")]
    InvalidAvailability {
        id: String,
        #[source]
        source: TimeError,
    },

    /// Document clock block could not be parsed
    #[error("invalid document clock: {0}")]
    InvalidClock(String),
}

impl ProcessError {
    /// Create invalid packet error
    pub fn invalid_packet(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidPacket {
            index,
            message: message.into(),
        }
    }
}

/// Result type alias for processing operations
pub type ProcessResult<T> = Result<T, ProcessError>;
