//! Timestamps and closed time intervals
//!
//! Intervals are written in ISO-8601 `start/stop` form, e.g.
//! `2012-08-04T16:00:00Z/2012-08-04T18:00:00Z`.

use crate::error::{TimeError, TimeResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Instant on the simulation timeline
pub type Timestamp = DateTime<Utc>;

/// Earliest representable instant; an interval starting here is unbounded on the left
pub const MINIMUM_TIME: Timestamp = DateTime::<Utc>::MIN_UTC;

/// Latest representable instant; an interval stopping here is unbounded on the right
pub const MAXIMUM_TIME: Timestamp = DateTime::<Utc>::MAX_UTC;

/// Parse an RFC 3339 timestamp into UTC
///
/// # Errors
/// Returns `TimeError::InvalidTimestamp` if `input` is not RFC 3339
pub fn parse_timestamp(input: &str) -> TimeResult<Timestamp> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| TimeError::invalid_timestamp(input, e))
}

/// Signed seconds from `from` to `to`
///
/// Works across the whole representable range, sentinels included.
#[must_use]
pub fn seconds_between(from: Timestamp, to: Timestamp) -> f64 {
    // Whole seconds and nanos are combined separately; a TimeDelta over the
    // full MIN..MAX span does not fit in milliseconds.
    let secs = (to.timestamp() - from.timestamp()) as f64;
    let nanos =
        f64::from(to.timestamp_subsec_nanos()) - f64::from(from.timestamp_subsec_nanos());
    secs + nanos / 1_000_000_000.0
}

/// Closed time interval `[start, stop]`
///
/// `start <= stop` always holds for intervals built through [`TimeInterval::new`]
/// or parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Inclusive start
    pub start: Timestamp,
    /// Inclusive stop
    pub stop: Timestamp,
}

impl TimeInterval {
    /// Interval covering all of time
    pub const UNBOUNDED: Self = Self {
        start: MINIMUM_TIME,
        stop: MAXIMUM_TIME,
    };

    /// Create interval
    ///
    /// # Errors
    /// Returns `TimeError::Reversed` if `start > stop`
    pub fn new(start: Timestamp, stop: Timestamp) -> TimeResult<Self> {
        if start > stop {
            return Err(TimeError::Reversed {
                start: format_timestamp(start),
                stop: format_timestamp(stop),
            });
        }
        Ok(Self { start, stop })
    }

    /// Degenerate interval containing a single instant
    #[inline]
    #[must_use]
    pub fn instant(at: Timestamp) -> Self {
        Self { start: at, stop: at }
    }

    /// Check if `time` lies inside the interval (both ends inclusive)
    #[inline]
    #[must_use]
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.stop
    }

    /// Start is not the minimum sentinel
    #[inline]
    #[must_use]
    pub fn has_finite_start(&self) -> bool {
        self.start != MINIMUM_TIME
    }

    /// Stop is not the maximum sentinel
    #[inline]
    #[must_use]
    pub fn has_finite_stop(&self) -> bool {
        self.stop != MAXIMUM_TIME
    }

    /// Length of the interval in seconds
    #[inline]
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        seconds_between(self.start, self.stop)
    }

    /// Smallest interval covering both `self` and `other`
    #[inline]
    #[must_use]
    pub fn union_bounds(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }
}

impl FromStr for TimeInterval {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, stop) = s
            .split_once('/')
            .ok_or_else(|| TimeError::InvalidInterval(s.to_string()))?;
        if start.trim().is_empty() || stop.trim().is_empty() {
            return Err(TimeError::InvalidInterval(s.to_string()));
        }
        Self::new(parse_timestamp(start)?, parse_timestamp(stop)?)
    }
}

impl Display for TimeInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            format_timestamp(self.start),
            format_timestamp(self.stop)
        )
    }
}

fn format_timestamp(t: Timestamp) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
