//! Vital-sign reading model
//!
//! This module contains the `VitalReading` model, a single recorded measurement
//! of one vital sign for one subject, together with the closed set of vital
//! types the engine understands. Readings are owned by the external data layer
//! and never mutated here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VitalsError};

/// Tracked vital-sign types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    /// Heart rate in beats per minute
    HeartRate,
    /// Systolic blood pressure in mmHg
    BloodPressureSystolic,
    /// Diastolic blood pressure in mmHg
    BloodPressureDiastolic,
    /// Body temperature in degrees Fahrenheit
    Temperature,
    /// Respiratory rate in breaths per minute
    RespiratoryRate,
    /// Peripheral oxygen saturation in percent
    OxygenSaturation,
}

impl VitalType {
    /// All tracked vital types
    pub const ALL: [Self; 6] = [
        Self::HeartRate,
        Self::BloodPressureSystolic,
        Self::BloodPressureDiastolic,
        Self::Temperature,
        Self::RespiratoryRate,
        Self::OxygenSaturation,
    ];

    /// Get the wire name used by the data layer
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::BloodPressureSystolic => "blood_pressure_systolic",
            Self::BloodPressureDiastolic => "blood_pressure_diastolic",
            Self::Temperature => "temperature",
            Self::RespiratoryRate => "respiratory_rate",
            Self::OxygenSaturation => "oxygen_saturation",
        }
    }

    /// Get the display name for this vital type
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart Rate",
            Self::BloodPressureSystolic => "Blood Pressure (Systolic)",
            Self::BloodPressureDiastolic => "Blood Pressure (Diastolic)",
            Self::Temperature => "Temperature",
            Self::RespiratoryRate => "Respiratory Rate",
            Self::OxygenSaturation => "Oxygen Saturation",
        }
    }

    /// Default display unit for this vital type
    #[must_use]
    pub const fn default_unit(self) -> &'static str {
        match self {
            Self::HeartRate => "bpm",
            Self::BloodPressureSystolic | Self::BloodPressureDiastolic => "mmHg",
            Self::Temperature => "°F",
            Self::RespiratoryRate => "breaths/min",
            Self::OxygenSaturation => "%",
        }
    }
}

impl FromStr for VitalType {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "heart_rate" => Ok(Self::HeartRate),
            "blood_pressure_systolic" => Ok(Self::BloodPressureSystolic),
            "blood_pressure_diastolic" => Ok(Self::BloodPressureDiastolic),
            "temperature" => Ok(Self::Temperature),
            "respiratory_rate" => Ok(Self::RespiratoryRate),
            "oxygen_saturation" => Ok(Self::OxygenSaturation),
            _ => Err(VitalsError::UnknownVitalType(s.to_string())),
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single recorded vital-sign measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    /// Identifier of the person the reading belongs to
    #[serde(alias = "patient_id")]
    pub subject_id: String,
    /// Which vital sign was measured
    pub vital_type: VitalType,
    /// Measured value, in the unit implied by `vital_type`
    pub value: f64,
    /// Display unit (not checked against `value`)
    #[serde(default)]
    pub unit: String,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
    /// Who recorded the measurement
    #[serde(default)]
    pub recorded_by: Option<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl VitalReading {
    /// Create a new reading with the default unit for its type
    #[must_use]
    pub fn new(
        subject_id: impl Into<String>,
        vital_type: VitalType,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            vital_type,
            value,
            unit: vital_type.default_unit().to_string(),
            recorded_at,
            recorded_by: None,
            notes: None,
        }
    }

    /// Set the display unit
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set who recorded the reading
    #[must_use]
    pub fn with_recorded_by(mut self, recorded_by: impl Into<String>) -> Self {
        self.recorded_by = Some(recorded_by.into());
        self
    }

    /// Attach notes to the reading
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check that the reading is fit for classification and scoring
    ///
    /// Every tracked vital type is a strictly positive physical quantity, so
    /// zero, negative and non-finite values are rejected here rather than
    /// being allowed into the deviation arithmetic.
    pub fn validate(&self) -> Result<()> {
        if self.subject_id.trim().is_empty() {
            return Err(VitalsError::validation(format!(
                "{} reading has an empty subject id",
                self.vital_type.as_str()
            )));
        }

        if !self.value.is_finite() {
            return Err(VitalsError::validation(format!(
                "{} value for subject {} is not a finite number: {}",
                self.vital_type.as_str(),
                self.subject_id,
                self.value
            )));
        }

        if self.value <= 0.0 {
            return Err(VitalsError::validation(format!(
                "{} value for subject {} must be positive, got {}",
                self.vital_type.as_str(),
                self.subject_id,
                self.value
            )));
        }

        Ok(())
    }
}

/// A reading as supplied by the data layer, before its type name is checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVitalReading {
    /// Identifier of the person the reading belongs to
    #[serde(alias = "patient_id")]
    pub subject_id: String,
    /// Free-text vital type name
    pub vital_type: String,
    /// Measured value
    pub value: f64,
    /// Display unit
    #[serde(default)]
    pub unit: String,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
    /// Who recorded the measurement
    #[serde(default)]
    pub recorded_by: Option<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl RawVitalReading {
    /// Resolve the vital type name and validate the result
    ///
    /// Returns `VitalsError::UnknownVitalType` when the name is not one of the
    /// tracked types; callers decide whether that is fatal.
    pub fn into_typed(self) -> Result<VitalReading> {
        let vital_type = self.vital_type.parse::<VitalType>()?;
        let unit = if self.unit.is_empty() {
            vital_type.default_unit().to_string()
        } else {
            self.unit
        };

        let reading = VitalReading {
            subject_id: self.subject_id,
            vital_type,
            value: self.value,
            unit,
            recorded_at: self.recorded_at,
            recorded_by: self.recorded_by,
            notes: self.notes,
        };
        reading.validate()?;
        Ok(reading)
    }
}

impl From<VitalReading> for RawVitalReading {
    fn from(reading: VitalReading) -> Self {
        Self {
            subject_id: reading.subject_id,
            vital_type: reading.vital_type.as_str().to_string(),
            value: reading.value,
            unit: reading.unit,
            recorded_at: reading.recorded_at,
            recorded_by: reading.recorded_by,
            notes: reading.notes,
        }
    }
}
