//! Data source configuration

use serde::{Deserialize, Deserializer, Serialize};

/// Playback duration used when none (or a non-positive one) is configured
pub const DEFAULT_PLAYBACK_SECONDS: f64 = 120.0;

/// Tunables for clock derivation and fetching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Wall-clock seconds a derived clock takes to play the whole scene.
    /// Non-positive or non-finite values fall back to the default.
    #[serde(deserialize_with = "deserialize_playback_seconds")]
    pub playback_seconds: f64,
    /// Lower bound for a derived multiplier
    pub minimum_multiplier: f64,
    /// Maximum fetched document size in bytes
    pub max_document_bytes: u64,
}

impl SourceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target playback duration
    #[inline]
    #[must_use]
    pub fn with_playback_seconds(mut self, seconds: f64) -> Self {
        self.playback_seconds = positive_or_default(seconds);
        self
    }

    /// Playback duration to divide by, even if the field was set directly
    #[inline]
    #[must_use]
    pub fn effective_playback_seconds(&self) -> f64 {
        positive_or_default(self.playback_seconds)
    }

    /// With multiplier floor
    #[inline]
    #[must_use]
    pub fn with_minimum_multiplier(mut self, multiplier: f64) -> Self {
        self.minimum_multiplier = multiplier;
        self
    }

    /// With document size limit
    #[inline]
    #[must_use]
    pub fn with_max_document_bytes(mut self, bytes: u64) -> Self {
        self.max_document_bytes = bytes;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            playback_seconds: DEFAULT_PLAYBACK_SECONDS,
            minimum_multiplier: 1.0,
            max_document_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

fn positive_or_default(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        tracing::warn!(seconds, "invalid playback duration, using default");
        DEFAULT_PLAYBACK_SECONDS
    }
}

fn deserialize_playback_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(positive_or_default)
}
