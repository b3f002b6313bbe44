//! Configuration for the health-score engine.

use serde::{Deserialize, Serialize};

use crate::algorithm::vitals::ranges::{VitalRangeTable, deserialize_overrides};
use crate::algorithm::vitals::score::ScoreGroup;
use crate::error::{Result, VitalsError};

/// Number of most recent readings per subject considered by batch scoring
pub const DEFAULT_READING_WINDOW: usize = 50;

/// Points available across all scoring groups
pub const MAX_SCORE_POINTS: f64 = 100.0;

/// Score movement (in points) that still counts as stable
pub const DEFAULT_TREND_THRESHOLD: u8 = 2;

/// Multiplier applied to the relative deviation of an out-of-range value
pub const DEFAULT_DEVIATION_PENALTY: f64 = 2.0;

/// How readings with an unrecognized vital type name are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypePolicy {
    /// Drop the reading with a warning; it is never abnormal and never scored
    #[default]
    Lenient,
    /// Reject the reading with `VitalsError::UnknownVitalType`
    Strict,
}

/// Configuration for classification and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoreConfig {
    /// Normal bounds and weights per vital type
    ///
    /// In JSON this is a map of overrides applied to the standard table; a
    /// `null` entry removes that type.
    #[serde(deserialize_with = "deserialize_overrides")]
    pub ranges: VitalRangeTable,
    /// Handling of unrecognized vital type names
    pub unknown_type_policy: UnknownTypePolicy,
    /// Points the score must move before the trend is up or down
    pub trend_threshold: u8,
    /// Penalty multiplier; a relative deviation of `1 / deviation_penalty` scores zero
    pub deviation_penalty: f64,
    /// Most recent readings kept per subject in batch scoring (`None` keeps all)
    pub reading_window: Option<usize>,
}

impl Default for HealthScoreConfig {
    fn default() -> Self {
        Self {
            ranges: VitalRangeTable::standard(),
            unknown_type_policy: UnknownTypePolicy::Lenient,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            deviation_penalty: DEFAULT_DEVIATION_PENALTY,
            reading_window: Some(DEFAULT_READING_WINDOW),
        }
    }
}

impl HealthScoreConfig {
    /// Default configuration with the strict unknown-type policy
    #[must_use]
    pub fn strict() -> Self {
        Self {
            unknown_type_policy: UnknownTypePolicy::Strict,
            ..Self::default()
        }
    }

    /// Load a configuration from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        self.ranges.validate()?;

        let total_points: f64 = ScoreGroup::ALL
            .iter()
            .map(|group| group.max_points(&self.ranges))
            .sum();
        if total_points > MAX_SCORE_POINTS + 1e-9 {
            return Err(VitalsError::config(format!(
                "group weights add up to {total_points}, more than {MAX_SCORE_POINTS}"
            )));
        }

        if !self.deviation_penalty.is_finite() || self.deviation_penalty <= 0.0 {
            return Err(VitalsError::config(format!(
                "deviation penalty must be a positive number, got {}",
                self.deviation_penalty
            )));
        }

        if self.reading_window == Some(0) {
            return Err(VitalsError::config("reading window must not be zero"));
        }

        Ok(())
    }
}
