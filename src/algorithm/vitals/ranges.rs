//! Canonical per-type range table
//!
//! One record per vital type carries both the inclusive normal bounds used by
//! the abnormality classifier and the weight used by the health-score
//! aggregator, so the two components cannot drift apart.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VitalsError};
use crate::models::vital::VitalType;

/// Inclusive normal/optimal bounds and scoring weight for one vital type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalRange {
    /// Lowest value still considered normal
    pub normal_min: f64,
    /// Highest value still considered normal
    pub normal_max: f64,
    /// Maximum points this type contributes to the composite score
    pub weight: f64,
}

impl VitalRange {
    /// Create a new range
    #[must_use]
    pub const fn new(normal_min: f64, normal_max: f64, weight: f64) -> Self {
        Self {
            normal_min,
            normal_max,
            weight,
        }
    }

    /// Check whether a value lies within the bounds (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.normal_min && value <= self.normal_max
    }

    /// Relative distance from `value` to the nearer bound
    ///
    /// Each distance is normalized by the magnitude of the bound it is
    /// measured against. Values inside the range have a deviation of zero.
    #[must_use]
    pub fn relative_deviation(&self, value: f64) -> f64 {
        if self.contains(value) {
            return 0.0;
        }

        let from_min = (value - self.normal_min).abs() / self.normal_min;
        let from_max = (value - self.normal_max).abs() / self.normal_max;
        from_min.min(from_max)
    }

    fn validate(&self, vital_type: VitalType) -> Result<()> {
        let name = vital_type.as_str();

        if !(self.normal_min.is_finite() && self.normal_max.is_finite() && self.weight.is_finite())
        {
            return Err(VitalsError::config(format!(
                "range for {name} contains a non-finite bound or weight"
            )));
        }

        // The deviation is normalized by the bounds
        if self.normal_min <= 0.0 {
            return Err(VitalsError::config(format!(
                "range for {name} must have a positive minimum, got {}",
                self.normal_min
            )));
        }

        if self.normal_min > self.normal_max {
            return Err(VitalsError::config(format!(
                "range for {name} has min {} above max {}",
                self.normal_min, self.normal_max
            )));
        }

        if self.weight < 0.0 {
            return Err(VitalsError::config(format!(
                "weight for {name} must not be negative, got {}",
                self.weight
            )));
        }

        Ok(())
    }
}

/// Range configuration keyed by vital type
///
/// A type missing from the table is "unconfigured": the classifier never flags
/// it and the aggregator scores it as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VitalRangeTable {
    ranges: BTreeMap<VitalType, VitalRange>,
}

static STANDARD_RANGES: LazyLock<VitalRangeTable> = LazyLock::new(VitalRangeTable::standard);

/// Shared instance of the standard range table
#[must_use]
pub fn standard_ranges() -> &'static VitalRangeTable {
    &STANDARD_RANGES
}

impl VitalRangeTable {
    /// Create a table with no configured types
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    /// The standard adult reference table
    ///
    /// Both blood-pressure components carry the full blood-pressure weight
    /// because the aggregator keeps only the lower of the two.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_range(VitalType::HeartRate, VitalRange::new(60.0, 100.0, 20.0))
            .with_range(
                VitalType::BloodPressureSystolic,
                VitalRange::new(90.0, 140.0, 15.0),
            )
            .with_range(
                VitalType::BloodPressureDiastolic,
                VitalRange::new(60.0, 90.0, 15.0),
            )
            .with_range(VitalType::Temperature, VitalRange::new(97.0, 99.5, 20.0))
            .with_range(VitalType::RespiratoryRate, VitalRange::new(12.0, 20.0, 15.0))
            .with_range(
                VitalType::OxygenSaturation,
                VitalRange::new(95.0, 100.0, 30.0),
            )
    }

    /// Set the range for a vital type
    #[must_use]
    pub fn with_range(mut self, vital_type: VitalType, range: VitalRange) -> Self {
        self.ranges.insert(vital_type, range);
        self
    }

    /// Remove a vital type from the table
    #[must_use]
    pub fn without(mut self, vital_type: VitalType) -> Self {
        self.ranges.remove(&vital_type);
        self
    }

    /// Apply per-type overrides; a `None` override unconfigures the type
    #[must_use]
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (VitalType, Option<VitalRange>)>,
    ) -> Self {
        for (vital_type, range) in overrides {
            match range {
                Some(range) => self.ranges.insert(vital_type, range),
                None => self.ranges.remove(&vital_type),
            };
        }
        self
    }

    /// Get the range for a vital type, if configured
    #[must_use]
    pub fn get(&self, vital_type: VitalType) -> Option<&VitalRange> {
        self.ranges.get(&vital_type)
    }

    /// Check whether a vital type is configured
    #[must_use]
    pub fn contains(&self, vital_type: VitalType) -> bool {
        self.ranges.contains_key(&vital_type)
    }

    /// Iterate over the configured types in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (VitalType, &VitalRange)> {
        self.ranges.iter().map(|(vital_type, range)| (*vital_type, range))
    }

    /// Check every configured range for consistency
    pub fn validate(&self) -> Result<()> {
        for (vital_type, range) in self.iter() {
            range.validate(vital_type)?;
        }
        Ok(())
    }
}

/// Deserialize a JSON override map onto the standard table
///
/// Types absent from the map keep their standard range and `null` removes a
/// type from the table.
pub fn deserialize_overrides<'de, D>(
    deserializer: D,
) -> std::result::Result<VitalRangeTable, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<VitalType, Option<VitalRange>>::deserialize(deserializer)?;
    for (vital_type, range) in &overrides {
        if range.is_none() {
            log::info!("Range configuration removes {vital_type} from classification and scoring");
        }
    }
    Ok(VitalRangeTable::standard().with_overrides(overrides))
}

impl Default for VitalRangeTable {
    fn default() -> Self {
        Self::standard()
    }
}
