//! Scene Time
//!
//! Time primitives shared by every scene crate.
//!
//! # Core Concepts
//!
//! - [`Timestamp`]: UTC instant on the simulation timeline
//! - [`MINIMUM_TIME`] / [`MAXIMUM_TIME`]: sentinels for "unbounded" interval ends
//! - [`TimeInterval`]: closed `[start, stop]` span, parsed from ISO-8601 `start/stop` text
//! - [`TimeIntervalCollection`]: ordered, coalesced set of intervals
//! - [`SimulationClock`]: start/stop/current time plus playback policy
//!
//! # Example
//!
//! ```rust,ignore
//! use scene_time::{TimeInterval, seconds_between};
//!
//! let interval: TimeInterval = "2012-08-04T16:00:00Z/2012-08-04T18:00:00Z".parse()?;
//! assert_eq!(seconds_between(interval.start, interval.stop), 7200.0);
//! ```

#![warn(unreachable_pub)]

mod clock;
mod collection;
mod error;
mod interval;

pub use clock::{ClockRange, ClockStep, SimulationClock};
pub use collection::TimeIntervalCollection;
pub use error::{TimeError, TimeResult};
pub use interval::{
    parse_timestamp, seconds_between, TimeInterval, Timestamp, MAXIMUM_TIME, MINIMUM_TIME,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
