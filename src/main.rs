use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::{info, warn};
use vitals_score::{HealthScoreConfig, RawVitalReading, score_raw_subjects};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("Usage: vitals-score <readings.json> [previous-score]");
    };

    let previous_score = args.next().as_deref().map(parse_previous_score).transpose()?;

    let path = Path::new(&path);
    info!("Loading vital readings from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read readings file: {}", path.display()))?;
    let raw_readings: Vec<RawVitalReading> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse readings file: {}", path.display()))?;
    info!("Loaded {} readings", raw_readings.len());

    // The same previous score applies to every subject in the file
    let previous_scores: HashMap<String, u8> = match previous_score {
        Some(score) => raw_readings
            .iter()
            .map(|reading| (reading.subject_id.clone(), score))
            .collect(),
        None => HashMap::new(),
    };

    let start = Instant::now();
    let config = HealthScoreConfig::default();
    let results = score_raw_subjects(raw_readings, &previous_scores, &config)?;
    info!("Scored {} subjects in {:?}", results.len(), start.elapsed());

    for (subject_id, result) in results.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
        match result {
            Ok(score) if !score.has_data() => {
                println!("{subject_id}: no vitals recorded yet");
            }
            Ok(score) => {
                let json = serde_json::to_string_pretty(&score)
                    .with_context(|| format!("Failed to serialize score for {subject_id}"))?;
                println!("{subject_id}: {json}");
            }
            Err(e) => {
                warn!("Skipping subject {subject_id}: {e}");
            }
        }
    }

    Ok(())
}

fn parse_previous_score(arg: &str) -> Result<u8> {
    let score: u8 = arg
        .parse()
        .with_context(|| format!("Previous score must be an integer between 0 and 100, got '{arg}'"))?;
    ensure!(
        score <= 100,
        "Previous score must be an integer between 0 and 100, got {score}"
    );
    Ok(score)
}
