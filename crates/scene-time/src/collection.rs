//! Ordered collections of time intervals

use crate::interval::{TimeInterval, Timestamp};

/// Sorted, non-overlapping set of intervals
///
/// Overlapping or touching intervals are coalesced on insertion, so the
/// collection's [`bounds`](Self::bounds) are simply the first start and the
/// last stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeIntervalCollection {
    intervals: Vec<TimeInterval>,
}

impl TimeIntervalCollection {
    /// Create empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary intervals, sorting and coalescing them
    #[must_use]
    pub fn from_intervals(intervals: impl IntoIterator<Item = TimeInterval>) -> Self {
        let mut collection = Self::new();
        for interval in intervals {
            collection.add(interval);
        }
        collection
    }

    /// Insert an interval, merging it with any it overlaps or touches
    pub fn add(&mut self, interval: TimeInterval) {
        let mut merged = interval;
        self.intervals.retain(|existing| {
            if existing.start <= merged.stop && merged.start <= existing.stop {
                merged = merged.union_bounds(existing);
                false
            } else {
                true
            }
        });
        let pos = self
            .intervals
            .binary_search_by(|i| i.start.cmp(&merged.start))
            .unwrap_or_else(|p| p);
        self.intervals.insert(pos, merged);
    }

    /// Earliest start, if any interval exists
    #[inline]
    #[must_use]
    pub fn start(&self) -> Option<Timestamp> {
        self.intervals.first().map(|i| i.start)
    }

    /// Latest stop, if any interval exists
    #[inline]
    #[must_use]
    pub fn stop(&self) -> Option<Timestamp> {
        self.intervals.last().map(|i| i.stop)
    }

    /// Single interval spanning the whole collection
    #[must_use]
    pub fn bounds(&self) -> Option<TimeInterval> {
        Some(TimeInterval {
            start: self.start()?,
            stop: self.stop()?,
        })
    }

    /// Check if any interval contains `time`
    #[must_use]
    pub fn contains(&self, time: Timestamp) -> bool {
        self.intervals.iter().any(|i| i.contains(time))
    }

    /// Number of disjoint intervals
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if collection holds no intervals
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterate intervals in start order
    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter()
    }
}

impl FromIterator<TimeInterval> for TimeIntervalCollection {
    fn from_iter<I: IntoIterator<Item = TimeInterval>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}
