//! Composite health-score result model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the composite score relative to the previous computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Score rose by more than the trend threshold
    Up,
    /// Score fell by more than the trend threshold
    Down,
    /// Score moved by at most the threshold, or there is nothing to compare against
    #[default]
    Stable,
}

impl Trend {
    /// Get the wire name for this trend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rounded sub-score per scoring group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub heart_rate: u8,
    pub blood_pressure: u8,
    pub temperature: u8,
    pub respiratory: u8,
    pub oxygen_sat: u8,
}

impl ScoreBreakdown {
    /// Sum of the rounded sub-scores
    ///
    /// This can differ from the composite score by rounding, since the
    /// composite is rounded once over the unrounded sub-scores.
    #[must_use]
    pub fn total(&self) -> u32 {
        [
            self.heart_rate,
            self.blood_pressure,
            self.temperature,
            self.respiratory,
            self.oxygen_sat,
        ]
        .iter()
        .map(|&s| u32::from(s))
        .sum()
    }
}

/// Composite health score for one subject
///
/// Recomputed on every request and never persisted. `last_updated` is `None`
/// when none of the scored vital types had a reading; callers should render
/// that as "no data" rather than as a score of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreResult {
    /// Composite score, 0-100
    pub score: u8,
    /// Movement relative to the caller's previous score
    pub trend: Trend,
    /// Most recent timestamp among the readings that contributed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Rounded sub-score per scoring group
    pub breakdown: ScoreBreakdown,
    /// Fraction of scoring groups backed by readings, 0.0-1.0
    pub data_completeness: f64,
}

impl HealthScoreResult {
    /// Result for a subject with no scored readings
    #[must_use]
    pub fn no_data() -> Self {
        Self {
            score: 0,
            trend: Trend::Stable,
            last_updated: None,
            breakdown: ScoreBreakdown::default(),
            data_completeness: 0.0,
        }
    }

    /// Whether any scored vital contributed to this result
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.last_updated.is_some()
    }
}
