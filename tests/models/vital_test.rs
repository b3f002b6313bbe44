//! Tests for the vital reading model

use vitals_score::{RawVitalReading, VitalReading, VitalType, VitalsError};

use crate::utils::at;

#[test]
fn test_reading_from_data_layer_json() {
    let json = r#"{
        "patient_id": "42",
        "vital_type": "oxygen_saturation",
        "value": 97.5,
        "unit": "%",
        "recorded_at": "2024-03-01T10:03:00Z",
        "recorded_by": "Nurse Adams"
    }"#;

    let reading: VitalReading = serde_json::from_str(json).unwrap();
    assert_eq!(reading.subject_id, "42");
    assert_eq!(reading.vital_type, VitalType::OxygenSaturation);
    assert_eq!(reading.value, 97.5);
    assert_eq!(reading.recorded_at, at(10, 3));
    assert_eq!(reading.recorded_by.as_deref(), Some("Nurse Adams"));
    assert_eq!(reading.notes, None);
}

#[test]
fn test_unknown_type_is_a_deserialization_error_for_typed_readings() {
    let json = r#"{
        "subject_id": "42",
        "vital_type": "weight",
        "value": 80.0,
        "recorded_at": "2024-03-01T10:03:00Z"
    }"#;

    assert!(serde_json::from_str::<VitalReading>(json).is_err());

    let raw: RawVitalReading = serde_json::from_str(json).unwrap();
    assert!(matches!(raw.into_typed(), Err(VitalsError::UnknownVitalType(_))));
}

#[test]
fn test_builder_and_metadata() {
    let reading = VitalReading::new("42", VitalType::Temperature, 37.0, at(9, 0))
        .with_unit("°C")
        .with_recorded_by("Dr. Reyes")
        .with_notes("oral");

    assert_eq!(reading.unit, "°C");
    assert_eq!(reading.notes.as_deref(), Some("oral"));
    assert_eq!(VitalType::Temperature.default_unit(), "°F");
    assert_eq!(VitalType::RespiratoryRate.to_string(), "Respiratory Rate");
    assert_eq!(VitalType::BloodPressureSystolic.as_str(), "blood_pressure_systolic");
}

#[test]
fn test_negative_value_is_rejected() {
    let reading = VitalReading::new("42", VitalType::HeartRate, -72.0, at(9, 0));
    assert!(matches!(reading.validate(), Err(VitalsError::Validation(_))));
}
