//! Logging utilities
//!
//! This module provides standardized logging functions for scoring operations.

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `target` - Subject id or batch description being operated on
pub fn log_operation_start(operation: &str, target: &str) {
    log::info!("{operation} {target}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, items: usize, elapsed: Option<std::time::Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `subject_id` - Optional subject the warning relates to
pub fn log_warning(message: &str, subject_id: Option<&str>) {
    if let Some(subject_id) = subject_id {
        log::warn!("{message}: subject {subject_id}");
    } else {
        log::warn!("{message}");
    }
}
