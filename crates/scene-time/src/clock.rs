//! Simulation clock state
//!
//! A [`SimulationClock`] is always built whole: either copied from a
//! document's clock block or derived from entity availability. A source with
//! no clock holds `None`, never a clock at the epoch.

use crate::interval::{TimeInterval, Timestamp};
use serde::{Deserialize, Serialize};

/// Behavior when current time leaves `[start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockRange {
    /// Time keeps advancing past either end
    Unbounded,
    /// Time stops at either end
    Clamped,
    /// On reaching stop, wrap to start
    #[default]
    LoopStop,
}

/// How the clock advances each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStep {
    /// Fixed amount per tick, scaled by the multiplier
    TickDependent,
    /// Wall-clock elapsed time scaled by the multiplier
    #[default]
    SystemClockMultiplier,
    /// Wall-clock time, multiplier ignored
    SystemClock,
}

/// Authoritative playback state for a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationClock {
    start_time: Timestamp,
    stop_time: Timestamp,
    current_time: Timestamp,
    range: ClockRange,
    step: ClockStep,
    multiplier: f64,
}

impl SimulationClock {
    /// Create clock from all six fields
    ///
    /// Values are taken as given; no ordering check is made between start,
    /// stop and current time.
    #[inline]
    #[must_use]
    pub fn new(
        start_time: Timestamp,
        stop_time: Timestamp,
        current_time: Timestamp,
        range: ClockRange,
        step: ClockStep,
        multiplier: f64,
    ) -> Self {
        Self {
            start_time,
            stop_time,
            current_time,
            range,
            step,
            multiplier,
        }
    }

    /// Start of playback
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// End of playback
    #[inline]
    #[must_use]
    pub fn stop_time(&self) -> Timestamp {
        self.stop_time
    }

    /// Current simulation time
    #[inline]
    #[must_use]
    pub fn current_time(&self) -> Timestamp {
        self.current_time
    }

    /// Behavior at the ends of the range
    #[inline]
    #[must_use]
    pub fn range(&self) -> ClockRange {
        self.range
    }

    /// Advance policy
    #[inline]
    #[must_use]
    pub fn step(&self) -> ClockStep {
        self.step
    }

    /// Playback rate; negative plays in reverse
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// `[start, stop]` as an interval, if ordered
    #[must_use]
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start_time, self.stop_time).ok()
    }
}
