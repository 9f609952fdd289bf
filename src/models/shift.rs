//! Shift record model.
//!
//! This module defines the [`ShiftRecord`] struct representing one scheduled
//! work period on a day's rota, exactly as received from the data provider.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The reserved publication status code meaning "published".
///
/// Any other value on [`ShiftRecord::publication_status`] counts as
/// unpublished (draft, pending, withdrawn).
pub const PUBLISHED_STATUS: i32 = 1;

/// One scheduled work period on a day's rota.
///
/// Timestamps are nullable: a record with a missing or unparseable start or
/// end time is still a valid record, and every accessor on this type is
/// total. Classification code degrades to safe defaults rather than failing
/// on such records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift.
    pub id: String,
    /// Id of the assigned staff member; `None` means the shift is open.
    #[serde(default)]
    pub staff_id: Option<String>,
    /// Display name of the assigned staff member.
    #[serde(default)]
    pub staff_name: Option<String>,
    /// Job title the shift is scheduled for.
    pub job_title: String,
    /// Department label, if the shift is scoped to one.
    #[serde(default)]
    pub department: Option<String>,
    /// Team labels, in rota order. May be empty.
    #[serde(default)]
    pub teams: Vec<String>,
    /// Scheduled start instant.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Scheduled end instant. May be numerically earlier than the start,
    /// signifying an overnight shift spanning midnight.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Unpaid break duration in minutes.
    #[serde(default)]
    pub break_minutes: i64,
    /// Whether this is a sleep-in shift.
    #[serde(default)]
    pub is_sleep_in: bool,
    /// Whether this shift is overtime.
    #[serde(default)]
    pub is_overtime: bool,
    /// Whether the assigned staff member leads the shift.
    #[serde(default)]
    pub is_shift_leader: bool,
    /// Whether the assigned staff member is acting up into a higher role.
    #[serde(default)]
    pub is_act_up: bool,
    /// Whether the shift is covered by staff from another location.
    #[serde(default)]
    pub is_external_staff: bool,
    /// Publication status code. [`PUBLISHED_STATUS`] means published.
    #[serde(default)]
    pub publication_status: i32,
    /// Clock-in instant, once the staff member has clocked in.
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    /// Clock-out instant, once the staff member has clocked out.
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    /// Explicit absence status code, set when the shift was reported absent.
    #[serde(default)]
    pub absence_status: Option<i32>,
}

impl ShiftRecord {
    /// Returns true if the shift has no assigned staff member.
    ///
    /// This is the single predicate shared by the department bucketizer and
    /// the stats aggregator, so their unassigned counts never diverge.
    pub fn is_unassigned(&self) -> bool {
        self.staff_id.is_none()
    }

    /// Returns true if the shift's publication status is the reserved
    /// "published" value.
    pub fn is_published(&self) -> bool {
        self.publication_status == PUBLISHED_STATUS
    }

    /// Returns true if the shift is scheduled to start on the given date.
    ///
    /// Shifts with no start time belong to no date and never match.
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start_time
            .map(|start| start.date_naive() == date)
            .unwrap_or(false)
    }

    /// Returns the scheduled start hour (0-23), if the start time is known.
    pub fn start_hour(&self) -> Option<u32> {
        self.start_time.map(|start| start.hour())
    }

    /// Calculates the worked hours for the shift.
    ///
    /// The duration is end minus start; when the end is numerically earlier
    /// than the start the shift spans midnight and 24 hours are added. The
    /// break duration is subtracted and the result is floored at zero. A
    /// shift with a missing start or end time works zero hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use rota_engine::models::ShiftRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let json = r#"{
    ///     "id": "shift_001",
    ///     "job_title": "Care Assistant",
    ///     "start_time": "2026-02-10T09:00:00Z",
    ///     "end_time": "2026-02-10T17:00:00Z"
    /// }"#;
    /// let shift: ShiftRecord = serde_json::from_str(json).unwrap();
    /// assert_eq!(shift.worked_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let (start, end) = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (start, end),
            _ => return Decimal::ZERO,
        };

        let mut total_minutes = (end - start).num_minutes();
        if total_minutes < 0 {
            // Overnight shift stored with a clock-face end time.
            total_minutes += 24 * 60;
        }

        let worked_minutes = (total_minutes - self.break_minutes.max(0)).max(0);

        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }
}
