//! Entry validation, applied before any store mutation.

use crate::errors::{AppError, AppResult};
use crate::models::time_entry::NewTimeEntry;

/// An entry must end at or after it starts, on the same calendar date.
/// Entries spanning midnight are not modeled.
pub fn validate_entry(entry: &NewTimeEntry) -> AppResult<()> {
    if entry.end_time < entry.start_time {
        return Err(AppError::InvalidEntry(format!(
            "end time {} is before start time {}",
            entry.end_time.format("%H:%M"),
            entry.start_time.format("%H:%M"),
        )));
    }
    Ok(())
}
