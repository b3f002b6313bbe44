//! Conversion of data-layer readings into typed readings
//!
//! Readings arrive with a free-text vital type name. Names outside the tracked
//! set are handled according to the configured [`UnknownTypePolicy`].

use crate::config::UnknownTypePolicy;
use crate::error::{Result, VitalsError};
use crate::models::vital::{RawVitalReading, VitalReading};
use crate::utils::logging::log_warning;

/// Type and validate a batch of raw readings
///
/// Under [`UnknownTypePolicy::Lenient`] readings with an unrecognized type are
/// dropped with a warning. Under [`UnknownTypePolicy::Strict`] the first such
/// reading fails the whole batch. Validation errors are fatal under both.
pub fn type_readings(
    raw_readings: Vec<RawVitalReading>,
    policy: UnknownTypePolicy,
) -> Result<Vec<VitalReading>> {
    let mut readings = Vec::with_capacity(raw_readings.len());
    let mut dropped = 0usize;

    for raw in raw_readings {
        let subject_id = raw.subject_id.clone();
        match raw.into_typed() {
            Ok(reading) => readings.push(reading),
            Err(VitalsError::UnknownVitalType(name)) if policy == UnknownTypePolicy::Lenient => {
                dropped += 1;
                log_warning(
                    &format!("Ignoring reading with unknown vital type '{name}'"),
                    Some(&subject_id),
                );
            }
            Err(e) => return Err(e),
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} readings with unknown vital types");
    }

    Ok(readings)
}
