//! Abnormality classification for single vital-sign readings
//!
//! A reading is abnormal when its type has a configured range and the value
//! lies strictly outside that range. Bounds are inclusive, so a value equal to
//! the minimum or maximum is normal.
//!
//! Types without a configured range are never abnormal. The same fail-open
//! rule applies to unrecognized type names passed to [`is_abnormal_str`].

use std::fmt;

use crate::algorithm::vitals::ranges::{VitalRangeTable, standard_ranges};
use crate::models::vital::{VitalReading, VitalType};

/// Position of a value relative to its normal range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    /// Below the normal minimum
    Low,
    /// Within the normal range, or the type is unconfigured
    Normal,
    /// Above the normal maximum
    High,
}

impl VitalStatus {
    /// Check if this status should be flagged
    #[must_use]
    pub fn is_abnormal(self) -> bool {
        self != Self::Normal
    }

    /// Get a descriptive name for this status
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Classifier over a specific range table
#[derive(Debug, Clone, Copy)]
pub struct VitalClassifier<'a> {
    ranges: &'a VitalRangeTable,
}

impl VitalClassifier<'static> {
    /// Create a classifier using the standard ranges
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_ranges())
    }
}

impl<'a> VitalClassifier<'a> {
    /// Create a classifier using the given ranges
    #[must_use]
    pub const fn new(ranges: &'a VitalRangeTable) -> Self {
        Self { ranges }
    }

    /// Classify a value for a vital type
    ///
    /// Non-finite values are not rejected here; `NaN` compares false against
    /// both bounds and classifies as normal. Validate readings first.
    #[must_use]
    pub fn classify(&self, vital_type: VitalType, value: f64) -> VitalStatus {
        match self.ranges.get(vital_type) {
            Some(range) if value < range.normal_min => VitalStatus::Low,
            Some(range) if value > range.normal_max => VitalStatus::High,
            _ => VitalStatus::Normal,
        }
    }

    /// Check whether a value is outside the normal range for its type
    #[must_use]
    pub fn is_abnormal(&self, vital_type: VitalType, value: f64) -> bool {
        self.classify(vital_type, value).is_abnormal()
    }

    /// Select the readings that fall outside their normal range
    #[must_use]
    pub fn abnormal_readings<'r>(&self, readings: &'r [VitalReading]) -> Vec<&'r VitalReading> {
        readings
            .iter()
            .filter(|reading| self.is_abnormal(reading.vital_type, reading.value))
            .collect()
    }
}

/// Classify a value against the standard ranges
#[must_use]
pub fn classify(vital_type: VitalType, value: f64) -> VitalStatus {
    VitalClassifier::standard().classify(vital_type, value)
}

/// Check whether a value is abnormal against the standard ranges
#[must_use]
pub fn is_abnormal(vital_type: VitalType, value: f64) -> bool {
    VitalClassifier::standard().is_abnormal(vital_type, value)
}

/// Check a value given the type's wire name
///
/// Unrecognized names are reported as not abnormal.
#[must_use]
pub fn is_abnormal_str(vital_type: &str, value: f64) -> bool {
    vital_type
        .parse::<VitalType>()
        .is_ok_and(|vital_type| is_abnormal(vital_type, value))
}

/// Select the readings that fall outside the standard ranges
#[must_use]
pub fn abnormal_readings(readings: &[VitalReading]) -> Vec<&VitalReading> {
    VitalClassifier::standard().abnormal_readings(readings)
}
