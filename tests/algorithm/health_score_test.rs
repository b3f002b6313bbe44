//! Tests for composite health-score aggregation
//!
//! These tests cover the end-to-end scoring scenarios: complete and partial
//! vital sets, deviation penalties, blood-pressure combination, trend and
//! the handling of unknown or invalid readings.

use vitals_score::{
    HealthScoreConfig, HealthScorer, RawVitalReading, ScoreBreakdown, Trend, VitalRange,
    VitalRangeTable, VitalType, VitalsError, compute_health_score,
};

use crate::utils::{at, healthy_readings, reading};

#[test]
fn test_complete_healthy_set_scores_100() {
    let result = compute_health_score(&healthy_readings(), None).unwrap();

    assert_eq!(result.score, 100);
    assert_eq!(result.trend, Trend::Stable);
    assert_eq!(result.last_updated, Some(at(10, 3)));
    assert_eq!(
        result.breakdown,
        ScoreBreakdown {
            heart_rate: 20,
            blood_pressure: 15,
            temperature: 20,
            respiratory: 15,
            oxygen_sat: 30,
        }
    );
    assert_eq!(result.data_completeness, 1.0);
}

#[test]
fn test_single_heart_rate_reading() {
    let readings = vec![reading(VitalType::HeartRate, 72.0, 10, 0)];
    let result = compute_health_score(&readings, None).unwrap();

    assert_eq!(result.score, 20);
    assert_eq!(result.breakdown.heart_rate, 20);
    assert_eq!(result.breakdown.blood_pressure, 0);
    assert_eq!(result.breakdown.temperature, 0);
    assert_eq!(result.breakdown.respiratory, 0);
    assert_eq!(result.breakdown.oxygen_sat, 0);
    assert_eq!(result.last_updated, Some(at(10, 0)));
    assert!((result.data_completeness - 0.2).abs() < 1e-12);
}

#[test]
fn test_empty_input_is_no_data() {
    let result = compute_health_score(&[], Some(80)).unwrap();

    assert!(!result.has_data());
    assert_eq!(result.score, 0);
    assert_eq!(result.breakdown, ScoreBreakdown::default());
    assert_eq!(result.last_updated, None);
    assert_eq!(result.trend, Trend::Stable);
    assert_eq!(result.data_completeness, 0.0);
}

#[test]
fn test_blood_pressure_uses_worse_component() {
    // Systolic 200 deviates 60/140 from the upper bound: 15 * (1 - 2 * 0.4286) = 2.14
    let mut readings = healthy_readings();
    readings.retain(|r| r.vital_type != VitalType::BloodPressureSystolic);
    readings.push(reading(VitalType::BloodPressureSystolic, 200.0, 10, 1));

    let result = compute_health_score(&readings, None).unwrap();
    assert_eq!(result.breakdown.blood_pressure, 2);
    assert_eq!(result.score, 87);

    // Far enough out that the systolic score floors at zero
    let mut readings = healthy_readings();
    readings.retain(|r| r.vital_type != VitalType::BloodPressureSystolic);
    readings.push(reading(VitalType::BloodPressureSystolic, 220.0, 10, 1));

    let result = compute_health_score(&readings, None).unwrap();
    assert_eq!(result.breakdown.blood_pressure, 0);
    assert_eq!(result.score, 85);
}

#[test]
fn test_blood_pressure_with_one_component_missing() {
    let readings = vec![reading(VitalType::BloodPressureSystolic, 120.0, 9, 30)];
    let result = compute_health_score(&readings, None).unwrap();

    assert_eq!(result.breakdown.blood_pressure, 0);
    assert_eq!(result.score, 0);
    assert!(result.has_data());
    assert_eq!(result.last_updated, Some(at(9, 30)));
    assert_eq!(result.data_completeness, 0.0);
}

#[test]
fn test_deviation_penalties() {
    let readings = vec![
        reading(VitalType::HeartRate, 110.0, 10, 0),
        reading(VitalType::BloodPressureSystolic, 120.0, 10, 0),
        reading(VitalType::BloodPressureDiastolic, 80.0, 10, 0),
        reading(VitalType::Temperature, 101.0, 10, 0),
        reading(VitalType::RespiratoryRate, 24.0, 10, 0),
        reading(VitalType::OxygenSaturation, 90.0, 10, 0),
    ];
    let result = compute_health_score(&readings, None).unwrap();

    assert_eq!(
        result.breakdown,
        ScoreBreakdown {
            heart_rate: 16,
            blood_pressure: 15,
            temperature: 19,
            respiratory: 9,
            oxygen_sat: 27,
        }
    );
    // 16 + 15 + 19.397 + 9 + 26.842
    assert_eq!(result.score, 86);
}

#[test]
fn test_latest_reading_per_type_wins() {
    let mut readings = healthy_readings();
    readings.push(reading(VitalType::HeartRate, 150.0, 9, 0));
    let result = compute_health_score(&readings, None).unwrap();
    assert_eq!(result.score, 100);

    readings.push(reading(VitalType::HeartRate, 150.0, 11, 0));
    let result = compute_health_score(&readings, None).unwrap();
    assert_eq!(result.breakdown.heart_rate, 0);
    assert_eq!(result.score, 80);
    assert_eq!(result.last_updated, Some(at(11, 0)));
}

#[test]
fn test_input_order_is_irrelevant() {
    let mut readings = healthy_readings();
    readings.push(reading(VitalType::Temperature, 102.5, 8, 0));
    let forward = compute_health_score(&readings, None).unwrap();

    readings.reverse();
    let backward = compute_health_score(&readings, None).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_trend_against_previous_score() {
    let readings = healthy_readings();

    assert_eq!(compute_health_score(&readings, Some(97)).unwrap().trend, Trend::Up);
    assert_eq!(compute_health_score(&readings, Some(98)).unwrap().trend, Trend::Stable);

    let single = vec![reading(VitalType::HeartRate, 72.0, 10, 0)];
    assert_eq!(compute_health_score(&single, Some(70)).unwrap().trend, Trend::Down);
    assert_eq!(compute_health_score(&single, Some(22)).unwrap().trend, Trend::Stable);
}

#[test]
fn test_composite_stays_within_bounds() {
    for step in 0..40 {
        let factor = 0.25 + f64::from(step) * 0.05;
        let readings = vec![
            reading(VitalType::HeartRate, 80.0 * factor, 10, 0),
            reading(VitalType::BloodPressureSystolic, 115.0 * factor, 10, 0),
            reading(VitalType::BloodPressureDiastolic, 75.0 * factor, 10, 0),
            reading(VitalType::Temperature, 98.0 * factor, 10, 0),
            reading(VitalType::RespiratoryRate, 16.0 * factor, 10, 0),
            reading(VitalType::OxygenSaturation, 97.0 * factor, 10, 0),
        ];
        let result = compute_health_score(&readings, None).unwrap();

        assert!(result.score <= 100, "factor {factor} scored {}", result.score);
        assert!(result.breakdown.heart_rate <= 20);
        assert!(result.breakdown.blood_pressure <= 15);
        assert!(result.breakdown.temperature <= 20);
        assert!(result.breakdown.respiratory <= 15);
        assert!(result.breakdown.oxygen_sat <= 30);
    }
}

#[test]
fn test_invalid_value_is_rejected() {
    let mut readings = healthy_readings();
    readings.push(reading(VitalType::OxygenSaturation, f64::NAN, 11, 0));

    let result = compute_health_score(&readings, None);
    assert!(matches!(result, Err(VitalsError::Validation(_))));
}

#[test]
fn test_raw_readings_with_unknown_types() {
    let mut raw: Vec<RawVitalReading> = healthy_readings()
        .into_iter()
        .map(RawVitalReading::from)
        .collect();
    raw.push(RawVitalReading {
        subject_id: "patient-1".to_string(),
        vital_type: "blood_glucose".to_string(),
        value: 250.0,
        unit: "mg/dL".to_string(),
        recorded_at: at(12, 0),
        recorded_by: None,
        notes: None,
    });

    let lenient = HealthScorer::default();
    let result = lenient.compute_raw(raw.clone(), None).unwrap();
    assert_eq!(result.score, 100);
    assert_eq!(result.last_updated, Some(at(10, 3)));

    let strict = HealthScorer::new(HealthScoreConfig::strict()).unwrap();
    let result = strict.compute_raw(raw, None);
    assert!(matches!(result, Err(VitalsError::UnknownVitalType(name)) if name == "blood_glucose"));
}

#[test]
fn test_custom_penalty_and_threshold() {
    let config = HealthScoreConfig {
        deviation_penalty: 1.0,
        trend_threshold: 0,
        ..HealthScoreConfig::default()
    };
    let scorer = HealthScorer::new(config).unwrap();

    let readings = vec![reading(VitalType::HeartRate, 110.0, 10, 0)];
    let result = scorer.compute(&readings, Some(17)).unwrap();

    // 20 * (1 - 0.1)
    assert_eq!(result.score, 18);
    assert_eq!(result.trend, Trend::Up);
}

#[test]
fn test_scorer_rejects_invalid_config() {
    let config = HealthScoreConfig {
        deviation_penalty: f64::NAN,
        ..HealthScoreConfig::default()
    };
    assert!(matches!(HealthScorer::new(config), Err(VitalsError::Config(_))));
}

#[test]
fn test_scorer_classifier_shares_custom_ranges() {
    let config = HealthScoreConfig {
        ranges: VitalRangeTable::standard()
            .with_range(VitalType::HeartRate, VitalRange::new(50.0, 90.0, 20.0)),
        ..HealthScoreConfig::default()
    };
    let scorer = HealthScorer::new(config).unwrap();
    assert_eq!(scorer.ranges().get(VitalType::HeartRate).unwrap().normal_max, 90.0);

    let classifier = scorer.classifier();
    assert!(!classifier.is_abnormal(VitalType::HeartRate, 55.0));
    assert!(classifier.is_abnormal(VitalType::HeartRate, 95.0));

    // The scorer penalizes exactly what its classifier flags
    let readings = vec![reading(VitalType::HeartRate, 95.0, 10, 0)];
    let result = scorer.compute(&readings, None).unwrap();
    assert!(result.breakdown.heart_rate < 20);

    let readings = vec![reading(VitalType::HeartRate, 55.0, 10, 0)];
    assert_eq!(scorer.compute(&readings, None).unwrap().breakdown.heart_rate, 20);
}
