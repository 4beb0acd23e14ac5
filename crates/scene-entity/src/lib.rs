//! Scene Entity
//!
//! The entity side of a scene data source:
//!
//! - [`Entity`]: a time-dynamic object with an availability and raw properties
//! - [`EntityStore`]: ordered, owned collection with `clear`/merge and
//!   aggregate availability
//! - [`DocumentProcessor`]: collaborator that turns a parsed document into
//!   store mutations plus a [`DocumentHeader`]
//!
//! # Architecture
//!
//! ```text
//! JSON document → DocumentProcessor → EntityStore (merged in place)
//!                        ↓
//!                 DocumentHeader (name, clock)
//! ```

#![warn(unreachable_pub)]

pub mod entity;
pub mod error;
pub mod processor;
pub mod store;

pub use entity::Entity;
pub use error::{ProcessError, ProcessResult};
pub use processor::{
    DocumentClock, DocumentHeader, DocumentProcessor, PacketProcessor, DOCUMENT_PACKET_ID,
};
pub use store::EntityStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
