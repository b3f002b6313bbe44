//! Composite health-score aggregation
//!
//! Scoring takes the most recent reading of each vital type, scores it against
//! the type's range with a linear penalty for relative deviation, and sums the
//! group sub-scores into a 0-100 composite.
//!
//! Missing vitals contribute zero rather than being left out of the total, so
//! a subject with few readings scores low. `data_completeness` on the result
//! tells an under-measured subject apart from an unhealthy one.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::algorithm::vitals::classifier::VitalClassifier;
use crate::algorithm::vitals::intake::type_readings;
use crate::algorithm::vitals::ranges::{VitalRange, VitalRangeTable};
use crate::algorithm::vitals::trend::derive_trend;
use crate::config::HealthScoreConfig;
use crate::error::Result;
use crate::models::health_score::{HealthScoreResult, ScoreBreakdown};
use crate::models::vital::{RawVitalReading, VitalReading, VitalType};

/// Scoring groups making up the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreGroup {
    HeartRate,
    /// Systolic and diastolic, combined by taking the lower score
    BloodPressure,
    Temperature,
    Respiratory,
    OxygenSaturation,
}

impl ScoreGroup {
    /// All scoring groups
    pub const ALL: [Self; 5] = [
        Self::HeartRate,
        Self::BloodPressure,
        Self::Temperature,
        Self::Respiratory,
        Self::OxygenSaturation,
    ];

    /// Vital types scored in this group
    #[must_use]
    pub const fn members(self) -> &'static [VitalType] {
        match self {
            Self::HeartRate => &[VitalType::HeartRate],
            Self::BloodPressure => &[
                VitalType::BloodPressureSystolic,
                VitalType::BloodPressureDiastolic,
            ],
            Self::Temperature => &[VitalType::Temperature],
            Self::Respiratory => &[VitalType::RespiratoryRate],
            Self::OxygenSaturation => &[VitalType::OxygenSaturation],
        }
    }

    /// Most points the group can contribute under `ranges`
    ///
    /// A group scores the lowest of its configured members, so its ceiling is
    /// the smallest member weight. A group with no configured member adds nothing.
    #[must_use]
    pub fn max_points(self, ranges: &VitalRangeTable) -> f64 {
        self.members()
            .iter()
            .filter_map(|vital_type| ranges.get(*vital_type).map(|range| range.weight))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Get the display name for this group
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart Rate",
            Self::BloodPressure => "Blood Pressure",
            Self::Temperature => "Temperature",
            Self::Respiratory => "Respiratory Rate",
            Self::OxygenSaturation => "Oxygen Saturation",
        }
    }
}

impl fmt::Display for ScoreGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Score one value against its range
///
/// Returns the full weight for a value within the range (inclusive) and zero
/// for an absent value. Otherwise the weight is reduced linearly by the
/// relative deviation times `deviation_penalty`, floored at zero.
#[must_use]
pub fn score_vital(value: Option<f64>, range: &VitalRange, deviation_penalty: f64) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };

    if range.contains(value) {
        return range.weight;
    }

    let deviation = range.relative_deviation(value);
    (range.weight * (1.0 - deviation * deviation_penalty)).max(0.0)
}

/// Select the most recent reading of each vital type
///
/// When two readings of a type share a timestamp, the one seen first wins.
#[must_use]
pub fn latest_readings(readings: &[VitalReading]) -> BTreeMap<VitalType, &VitalReading> {
    let mut latest: BTreeMap<VitalType, &VitalReading> = BTreeMap::new();

    for reading in readings {
        latest
            .entry(reading.vital_type)
            .and_modify(|current| {
                if reading.recorded_at > current.recorded_at {
                    *current = reading;
                }
            })
            .or_insert(reading);
    }

    latest
}

/// Computes composite health scores from a subject's readings
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    config: HealthScoreConfig,
}

impl HealthScorer {
    /// Create a scorer, rejecting an inconsistent configuration
    pub fn new(config: HealthScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &HealthScoreConfig {
        &self.config
    }

    /// Ranges in use
    #[must_use]
    pub const fn ranges(&self) -> &VitalRangeTable {
        &self.config.ranges
    }

    /// Classifier over the same ranges the scorer uses
    #[must_use]
    pub const fn classifier(&self) -> VitalClassifier<'_> {
        VitalClassifier::new(&self.config.ranges)
    }

    /// Type raw readings according to the configured unknown-type policy
    pub fn type_readings(&self, raw_readings: Vec<RawVitalReading>) -> Result<Vec<VitalReading>> {
        type_readings(raw_readings, self.config.unknown_type_policy)
    }

    /// Compute the health score for one subject's readings
    ///
    /// The caller scopes `readings` to one subject and a recent window. Every
    /// reading is validated first; an empty slice yields a "no data" result.
    pub fn compute(
        &self,
        readings: &[VitalReading],
        previous_score: Option<u8>,
    ) -> Result<HealthScoreResult> {
        for reading in readings {
            reading.validate()?;
        }
        Ok(self.score_validated(readings, previous_score))
    }

    /// Compute the health score from untyped data-layer readings
    pub fn compute_raw(
        &self,
        raw_readings: Vec<RawVitalReading>,
        previous_score: Option<u8>,
    ) -> Result<HealthScoreResult> {
        let readings = self.type_readings(raw_readings)?;
        Ok(self.score_validated(&readings, previous_score))
    }

    /// Score a single group from the latest readings
    ///
    /// A group scores the minimum over its configured members, so one bad
    /// blood-pressure component dominates the pair. Members without a
    /// configured range are skipped; a group with none scores zero.
    fn score_group(&self, group: ScoreGroup, latest: &BTreeMap<VitalType, &VitalReading>) -> f64 {
        group
            .members()
            .iter()
            .filter_map(|vital_type| {
                self.config.ranges.get(*vital_type).map(|range| {
                    let value = latest.get(vital_type).map(|reading| reading.value);
                    score_vital(value, range, self.config.deviation_penalty)
                })
            })
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Whether every configured member of a group has a reading
    fn group_measured(&self, group: ScoreGroup, latest: &BTreeMap<VitalType, &VitalReading>) -> bool {
        let mut configured = group
            .members()
            .iter()
            .filter(|vital_type| self.config.ranges.contains(**vital_type))
            .peekable();

        configured.peek().is_some() && configured.all(|vital_type| latest.contains_key(vital_type))
    }

    fn score_validated(
        &self,
        readings: &[VitalReading],
        previous_score: Option<u8>,
    ) -> HealthScoreResult {
        let latest: BTreeMap<VitalType, &VitalReading> = latest_readings(readings)
            .into_iter()
            .filter(|(vital_type, _)| self.config.ranges.contains(*vital_type))
            .collect();

        let last_updated: Option<DateTime<Utc>> =
            latest.values().map(|reading| reading.recorded_at).max();

        if last_updated.is_none() {
            log::debug!("No scored vitals among {} readings", readings.len());
            return HealthScoreResult::no_data();
        }

        let heart_rate = self.score_group(ScoreGroup::HeartRate, &latest);
        let blood_pressure = self.score_group(ScoreGroup::BloodPressure, &latest);
        let temperature = self.score_group(ScoreGroup::Temperature, &latest);
        let respiratory = self.score_group(ScoreGroup::Respiratory, &latest);
        let oxygen_sat = self.score_group(ScoreGroup::OxygenSaturation, &latest);

        let total = heart_rate + blood_pressure + temperature + respiratory + oxygen_sat;
        let score = round_points(total);

        let measured = ScoreGroup::ALL
            .iter()
            .filter(|group| self.group_measured(**group, &latest))
            .count();
        let data_completeness = measured as f64 / ScoreGroup::ALL.len() as f64;

        let trend = derive_trend(score, previous_score, self.config.trend_threshold);

        log::debug!(
            "Scored {} latest vitals: score {score}, trend {trend}, completeness {data_completeness:.2}",
            latest.len()
        );

        HealthScoreResult {
            score,
            trend,
            last_updated,
            breakdown: ScoreBreakdown {
                heart_rate: round_points(heart_rate),
                blood_pressure: round_points(blood_pressure),
                temperature: round_points(temperature),
                respiratory: round_points(respiratory),
                oxygen_sat: round_points(oxygen_sat),
            },
            data_completeness,
        }
    }
}

/// Round a point total to an integer score in 0-100
fn round_points(points: f64) -> u8 {
    points.round().clamp(0.0, 100.0) as u8
}

/// Compute the health score with the default configuration
pub fn compute_health_score(
    readings: &[VitalReading],
    previous_score: Option<u8>,
) -> Result<HealthScoreResult> {
    HealthScorer::default().compute(readings, previous_score)
}
