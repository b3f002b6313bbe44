//! Vital-sign abnormality classification and health scoring
//!
//! This module implements the abnormality classifier for single readings and
//! the composite health-score aggregator over a subject's recent readings.
//! Both read from one canonical range table.

pub mod batch;
pub mod classifier;
pub mod intake;
pub mod ranges;
pub mod score;
pub mod trend;

// Re-export common types
pub use batch::{score_raw_subjects, score_subjects};
pub use classifier::{VitalClassifier, VitalStatus, abnormal_readings, classify, is_abnormal, is_abnormal_str};
pub use ranges::{VitalRange, VitalRangeTable, standard_ranges};
pub use score::{HealthScorer, ScoreGroup, compute_health_score, latest_readings, score_vital};
pub use trend::derive_trend;
