//! Health-score computation across many subjects
//!
//! Readings for several subjects are grouped by subject id, trimmed to each
//! subject's most recent window and scored in parallel using Rayon. Subjects
//! are independent, so a failing subject does not affect the others.

use std::collections::HashMap;
use std::time::Instant;

use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithm::vitals::score::HealthScorer;
use crate::config::HealthScoreConfig;
use crate::error::Result;
use crate::models::health_score::HealthScoreResult;
use crate::models::vital::{RawVitalReading, VitalReading};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Group readings by subject id
#[must_use]
pub fn group_by_subject(readings: Vec<VitalReading>) -> FxHashMap<String, Vec<VitalReading>> {
    group_by_subject_id(readings, |reading| reading.subject_id.as_str())
}

fn group_by_subject_id<T>(
    items: Vec<T>,
    subject_id: impl Fn(&T) -> &str,
) -> FxHashMap<String, Vec<T>> {
    let mut grouped: FxHashMap<String, Vec<T>> = FxHashMap::default();
    for item in items {
        grouped
            .entry(subject_id(&item).to_string())
            .or_default()
            .push(item);
    }
    grouped
}

/// Keep the `window` most recent readings, newest first
#[must_use]
pub fn recent_window(readings: Vec<VitalReading>, window: usize) -> Vec<VitalReading> {
    readings
        .into_iter()
        .sorted_by(|a, b| b.recorded_at.cmp(&a.recorded_at))
        .take(window)
        .collect()
}

/// Score every subject present in `readings`
///
/// `previous_scores` holds the caller's last composite score per subject and
/// drives the trend; subjects missing from it get a stable trend. The outer
/// error is a configuration error; per-subject errors are validation failures.
pub fn score_subjects(
    readings: Vec<VitalReading>,
    previous_scores: &HashMap<String, u8>,
    config: &HealthScoreConfig,
) -> Result<HashMap<String, Result<HealthScoreResult>>> {
    let reading_count = readings.len();
    score_grouped(
        group_by_subject(readings),
        reading_count,
        previous_scores,
        config,
        |_, readings| Ok(readings),
    )
}

/// Score every subject present in untyped data-layer readings
///
/// Type names are resolved per subject under the configured unknown-type
/// policy, so an invalid reading or a rejected type name only fails the
/// subject it belongs to.
pub fn score_raw_subjects(
    raw_readings: Vec<RawVitalReading>,
    previous_scores: &HashMap<String, u8>,
    config: &HealthScoreConfig,
) -> Result<HashMap<String, Result<HealthScoreResult>>> {
    let reading_count = raw_readings.len();
    score_grouped(
        group_by_subject_id(raw_readings, |raw| raw.subject_id.as_str()),
        reading_count,
        previous_scores,
        config,
        HealthScorer::type_readings,
    )
}

fn score_grouped<T, F>(
    grouped: FxHashMap<String, Vec<T>>,
    reading_count: usize,
    previous_scores: &HashMap<String, u8>,
    config: &HealthScoreConfig,
    prepare: F,
) -> Result<HashMap<String, Result<HealthScoreResult>>>
where
    T: Send,
    F: Fn(&HealthScorer, Vec<T>) -> Result<Vec<VitalReading>> + Sync,
{
    let scorer = HealthScorer::new(config.clone())?;

    log_operation_start(
        "Scoring vitals for",
        &format!("{} subjects ({reading_count} readings)", grouped.len()),
    );
    let start = Instant::now();

    let results: HashMap<String, Result<HealthScoreResult>> = grouped
        .into_par_iter()
        .map(|(subject_id, subject_readings)| {
            let previous = previous_scores.get(&subject_id).copied();
            let result = prepare(&scorer, subject_readings).and_then(|readings| {
                let window = match config.reading_window {
                    Some(window) => recent_window(readings, window),
                    None => readings,
                };
                scorer.compute(&window, previous)
            });

            if let Err(e) = &result {
                log::warn!("Failed to score subject {subject_id}: {e}");
            }

            (subject_id, result)
        })
        .collect();

    log_operation_complete("scored", results.len(), Some(start.elapsed()));

    Ok(results)
}
