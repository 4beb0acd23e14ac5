//! Scene Source
//!
//! Exposes an ingested time-dynamic scene to a visualization host as a
//! queryable, observable data source.
//!
//! # Core Operations
//!
//! - **Merge**: [`SceneDataSource::process`] adds/updates entities in place
//! - **Replace**: [`SceneDataSource::load`] clears the store first
//! - **Fetch**: [`SceneDataSource::process_url`] / [`SceneDataSource::load_url`]
//!   resolve a URL, broadcasting fetch failures on the error channel
//!
//! After every ingestion the [`SimulationClock`](scene_time::SimulationClock)
//! is re-derived from scratch, see [`derive_clock`].
//!
//! # Architecture
//!
//! ```text
//! URL → DocumentFetcher → JSON → DocumentProcessor → EntityStore
//!                                        ↓                ↓
//!                                 DocumentHeader → derive_clock → clock
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use scene_source::SceneDataSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = SceneDataSource::new();
//! source.on_error(|source, err| eprintln!("{:?} failed: {err}", source.name()));
//!
//! source.load_url("http://host/path/scene.czml").await?;
//! assert_eq!(source.name(), Some("scene.czml"));
//! if let Some(clock) = source.clock() {
//!     println!("plays {} → {} at x{}", clock.start_time(), clock.stop_time(), clock.multiplier());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod source;

pub use clock::{derive_clock, playback_multiplier};
pub use config::SourceConfig;
pub use error::{FetchError, SourceError, SourceResult};
pub use events::ListenerId;
pub use fetch::{DefaultFetcher, DocumentFetcher};
pub use source::{ChangedListener, ErrorListener, SceneDataSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with scene data sources
    pub use crate::{
        DocumentFetcher, FetchError, SceneDataSource, SourceConfig, SourceError, SourceResult,
    };
    pub use scene_entity::{DocumentProcessor, Entity, EntityStore};
    pub use scene_time::{ClockRange, ClockStep, SimulationClock, TimeInterval};
}
