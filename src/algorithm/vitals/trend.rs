//! Trend derivation between consecutive composite scores

use crate::models::health_score::Trend;

/// Compare a new composite score against the caller's previous one
///
/// The score must move by more than `threshold` points to count as up or
/// down. Without a previous score the trend is stable.
#[must_use]
pub fn derive_trend(new_score: u8, previous_score: Option<u8>, threshold: u8) -> Trend {
    let Some(previous) = previous_score else {
        return Trend::Stable;
    };

    let new_score = i16::from(new_score);
    let previous = i16::from(previous);
    let threshold = i16::from(threshold);

    if new_score > previous + threshold {
        Trend::Up
    } else if new_score < previous - threshold {
        Trend::Down
    } else {
        Trend::Stable
    }
}
