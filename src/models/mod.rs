//! Domain models for the vitals engine
//!
//! This module contains the input readings supplied by the data layer and the
//! health-score result handed back to it.

pub mod health_score;
pub mod vital;

// Re-export commonly used types
pub use health_score::{HealthScoreResult, ScoreBreakdown, Trend};
pub use vital::{RawVitalReading, VitalReading, VitalType};
