//! Staff roster model.
//!
//! This module defines the [`StaffRecord`] and [`LeaveInterval`] structs for
//! staff members rostered at a location.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A booked leave interval for a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInterval {
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Whether the leave reason is sensitive and should not be surfaced.
    #[serde(default)]
    pub is_sensitive: bool,
    /// Leave-type label, e.g. "Annual Leave".
    pub leave_type: String,
}

impl LeaveInterval {
    /// Returns true if the interval contains the given date.
    ///
    /// Comparison is date-only and inclusive at both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A roster entry for a staff member at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub job_title: String,
    /// Date of birth, if recorded.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Booked leave intervals.
    #[serde(default)]
    pub leave: Vec<LeaveInterval>,
}

impl StaffRecord {
    /// Returns true if the staff member has at least one leave interval
    /// containing the given date.
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.leave.iter().any(|interval| interval.contains(date))
    }
}
