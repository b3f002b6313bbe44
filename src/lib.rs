//! A Rust library for classifying vital-sign readings as normal or abnormal
//! and aggregating them into a composite 0-100 health score.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{HealthScoreConfig, UnknownTypePolicy};
pub use error::{Result, VitalsError};
pub use models::{HealthScoreResult, RawVitalReading, ScoreBreakdown, Trend, VitalReading, VitalType};

// Classification and scoring
pub use algorithm::vitals::{
    HealthScorer, ScoreGroup, VitalClassifier, VitalRange, VitalRangeTable, VitalStatus,
    abnormal_readings, classify, compute_health_score, derive_trend, is_abnormal, is_abnormal_str,
    score_raw_subjects, score_subjects, score_vital,
};
