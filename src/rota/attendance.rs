//! Attendance classification.
//!
//! This module derives the attendance state of a shift from its clock data
//! and an injectable reference instant. The state is never stored; it is
//! recomputed on every pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// The attendance state of a shift at a reference instant.
///
/// Derived, never persisted. Exactly one of the five states applies to any
/// shift at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The shift has not started yet.
    Scheduled,
    /// The staff member has clocked in and not yet clocked out.
    Present,
    /// The shift has started and the staff member has not clocked in.
    Late,
    /// The staff member has clocked in and out.
    Worked,
    /// The shift was explicitly reported absent.
    Absent,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Scheduled => write!(f, "scheduled"),
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::Worked => write!(f, "worked"),
            AttendanceStatus::Absent => write!(f, "absent"),
        }
    }
}

/// The result of classifying one shift: its status and how late it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    /// The derived attendance state.
    pub status: AttendanceStatus,
    /// Minutes late, always >= 0.
    ///
    /// For [`AttendanceStatus::Late`], minutes between the reference instant
    /// and the scheduled start. For [`AttendanceStatus::Present`], minutes
    /// between clock-in and the scheduled start when clock-in was after the
    /// start. Zero for every other state.
    pub minutes_late: i64,
}

/// Classifies a shift into an attendance state at the given reference
/// instant.
///
/// Rules are checked in priority order, first match wins:
///
/// 1. An explicit absence code means `absent`, whatever else is set.
/// 2. Clock-in and clock-out both present means `worked`.
/// 3. Clock-in alone means `present`.
/// 4. No clock-in with the scheduled start at or before the reference
///    instant means `late`.
/// 5. Otherwise `scheduled`.
///
/// There is no grace period: a shift is `late` the instant the reference
/// time passes the scheduled start. Missing timestamps never fail the
/// classification; the affected rule simply cannot match and the chain
/// falls through.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rota_engine::models::ShiftRecord;
/// use rota_engine::rota::{AttendanceStatus, classify_attendance};
///
/// let json = r#"{
///     "id": "shift_001",
///     "job_title": "Care Assistant",
///     "start_time": "2026-02-10T09:00:00Z"
/// }"#;
/// let shift: ShiftRecord = serde_json::from_str(json).unwrap();
///
/// let reference = Utc.with_ymd_and_hms(2026, 2, 10, 9, 5, 0).unwrap();
/// let mark = classify_attendance(&shift, reference);
/// assert_eq!(mark.status, AttendanceStatus::Late);
/// assert_eq!(mark.minutes_late, 5);
/// ```
pub fn classify_attendance(shift: &ShiftRecord, reference: DateTime<Utc>) -> AttendanceMark {
    if shift.absence_status.is_some() {
        return AttendanceMark {
            status: AttendanceStatus::Absent,
            minutes_late: 0,
        };
    }

    match (shift.clock_in, shift.clock_out) {
        (Some(_), Some(_)) => AttendanceMark {
            status: AttendanceStatus::Worked,
            minutes_late: 0,
        },
        (Some(clock_in), None) => AttendanceMark {
            status: AttendanceStatus::Present,
            minutes_late: minutes_after_start(shift, clock_in),
        },
        (None, _) => match shift.start_time {
            Some(start) if start <= reference => AttendanceMark {
                status: AttendanceStatus::Late,
                minutes_late: (reference - start).num_minutes().max(0),
            },
            _ => AttendanceMark {
                status: AttendanceStatus::Scheduled,
                minutes_late: 0,
            },
        },
    }
}

/// Minutes between an instant and the scheduled start, clamped to >= 0.
fn minutes_after_start(shift: &ShiftRecord, instant: DateTime<Utc>) -> i64 {
    shift
        .start_time
        .map(|start| (instant - start).num_minutes().max(0))
        .unwrap_or(0)
}
