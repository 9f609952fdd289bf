//! Shift-type classification.
//!
//! This module classifies shifts into day, night, and sleep-in types from
//! the sleep-in flag and the scheduled start hour.

use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// Hour (inclusive) from which a start counts as a night shift.
pub const NIGHT_START_HOUR: u32 = 20;

/// Hour (exclusive) until which a start counts as a night shift.
pub const NIGHT_END_HOUR: u32 = 6;

/// Start hour assumed for shifts with no scheduled start time.
pub const DEFAULT_START_HOUR: u32 = 8;

/// The operational type of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    /// A daytime shift.
    Day,
    /// A night shift starting at or after 20:00 or before 06:00.
    Night,
    /// An overnight sleep-in shift, flagged explicitly on the record.
    #[serde(rename = "sleepin")]
    SleepIn,
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftType::Day => write!(f, "day"),
            ShiftType::Night => write!(f, "night"),
            ShiftType::SleepIn => write!(f, "sleepin"),
        }
    }
}

/// Classifies a shift into day, night, or sleep-in.
///
/// The sleep-in flag takes precedence over the start hour. Without it, a
/// start hour at or after [`NIGHT_START_HOUR`] or before [`NIGHT_END_HOUR`]
/// is a night shift and anything else is a day shift. A shift with no start
/// time is assumed to start at [`DEFAULT_START_HOUR`] and classifies as day.
///
/// The hour is read from the instant exactly as stored; records are
/// expected to carry local wall-clock times before they reach the pipeline.
///
/// Pure and total: there are no failure modes.
pub fn classify_shift_type(shift: &ShiftRecord) -> ShiftType {
    if shift.is_sleep_in {
        return ShiftType::SleepIn;
    }

    let hour = shift.start_hour().unwrap_or(DEFAULT_START_HOUR);
    if hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR {
        ShiftType::Night
    } else {
        ShiftType::Day
    }
}
