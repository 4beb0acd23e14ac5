//! Simulation clock derivation
//!
//! The clock is recomputed from scratch after every ingestion:
//! 1. a clock declared by the document is copied field for field
//! 2. otherwise the store's aggregate availability is played back on a loop
//!    over a fixed wall-clock duration
//! 3. otherwise (availability unbounded on the left) there is no clock

use crate::config::SourceConfig;
use scene_entity::{DocumentClock, EntityStore};
use scene_time::{ClockRange, ClockStep, SimulationClock};

/// Derive the clock for `store`, preferring `document_clock` when declared
///
/// A declared clock is trusted as-is: the processor validated it when the
/// document was parsed, and no consistency check against the store is made.
#[must_use]
pub fn derive_clock(
    store: &EntityStore,
    document_clock: Option<&DocumentClock>,
    config: &SourceConfig,
) -> Option<SimulationClock> {
    if let Some(declared) = document_clock {
        tracing::debug!("using clock declared by document");
        return Some(SimulationClock::new(
            declared.start_time,
            declared.stop_time,
            declared.current_time,
            declared.range,
            declared.step,
            declared.multiplier,
        ));
    }

    let availability = store.compute_availability();
    if !availability.has_finite_start() {
        tracing::debug!(
            entities = store.len(),
            "availability unbounded on the left, no clock derived"
        );
        return None;
    }

    let multiplier = playback_multiplier(availability.duration_seconds(), config);
    tracing::debug!(%availability, multiplier, "derived clock from availability");
    Some(SimulationClock::new(
        availability.start,
        availability.stop,
        availability.start,
        ClockRange::LoopStop,
        ClockStep::SystemClockMultiplier,
        multiplier,
    ))
}

/// Multiplier that plays `total_seconds` of scene in the configured duration
///
/// Rounded to a whole number and floored at the configured minimum, so
/// short or zero-length scenes still advance.
#[must_use]
pub fn playback_multiplier(total_seconds: f64, config: &SourceConfig) -> f64 {
    let multiplier = (total_seconds / config.effective_playback_seconds()).round();
    if multiplier.is_nan() || multiplier < config.minimum_multiplier {
        config.minimum_multiplier
    } else {
        multiplier
    }
}
