//! Filter value object and the shift filter pipeline.
//!
//! Filters arrive from the UI as plain strings. Each selector deserializes
//! into a small enum that falls back to `All` on anything outside its
//! vocabulary, so an unrecognized value widens the view instead of raising.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;
use crate::rota::attendance::{AttendanceStatus, classify_attendance};
use crate::rota::shift_type::{ShiftType, classify_shift_type};

/// Department selector: `all`, `agency`, `other-locations`, or a department
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepartmentFilter {
    /// Show every department.
    #[default]
    All,
    /// Show the agency group.
    Agency,
    /// Show staff working in from other locations.
    OtherLocations,
    /// Show a single named department.
    Department(String),
}

impl From<String> for DepartmentFilter {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "all" => DepartmentFilter::All,
            "agency" => DepartmentFilter::Agency,
            "other-locations" => DepartmentFilter::OtherLocations,
            _ => DepartmentFilter::Department(value),
        }
    }
}

impl From<DepartmentFilter> for String {
    fn from(value: DepartmentFilter) -> Self {
        match value {
            DepartmentFilter::All => "all".to_string(),
            DepartmentFilter::Agency => "agency".to_string(),
            DepartmentFilter::OtherLocations => "other-locations".to_string(),
            DepartmentFilter::Department(name) => name,
        }
    }
}

/// Attendance status selector: `all` or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    /// Keep every status.
    #[default]
    All,
    /// Keep only shifts currently in the given status.
    Is(AttendanceStatus),
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "scheduled" => StatusFilter::Is(AttendanceStatus::Scheduled),
            "present" => StatusFilter::Is(AttendanceStatus::Present),
            "late" => StatusFilter::Is(AttendanceStatus::Late),
            "worked" => StatusFilter::Is(AttendanceStatus::Worked),
            "absent" => StatusFilter::Is(AttendanceStatus::Absent),
            // Unknown selector values fail open.
            _ => StatusFilter::All,
        }
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Is(status) => status.to_string(),
        }
    }
}

/// Shift-type selector: `all`, `day`, `night`, or `sleepin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShiftTypeFilter {
    /// Keep every shift type.
    #[default]
    All,
    /// Keep only shifts of the given type.
    Is(ShiftType),
}

impl From<String> for ShiftTypeFilter {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "day" => ShiftTypeFilter::Is(ShiftType::Day),
            "night" => ShiftTypeFilter::Is(ShiftType::Night),
            "sleepin" => ShiftTypeFilter::Is(ShiftType::SleepIn),
            _ => ShiftTypeFilter::All,
        }
    }
}

impl From<ShiftTypeFilter> for String {
    fn from(value: ShiftTypeFilter) -> Self {
        match value {
            ShiftTypeFilter::All => "all".to_string(),
            ShiftTypeFilter::Is(shift_type) => shift_type.to_string(),
        }
    }
}

/// The filters a user has applied to a rota day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotaFilters {
    /// Free-text search over assigned staff names.
    #[serde(default)]
    pub search: String,
    /// Department selector. Applied during bucket construction, not here:
    /// it gates the other-locations group rather than removing shifts.
    #[serde(default)]
    pub department: DepartmentFilter,
    /// Attendance status selector.
    #[serde(default)]
    pub status: StatusFilter,
    /// Shift-type selector.
    #[serde(default)]
    pub shift_type: ShiftTypeFilter,
}

/// Narrows a multi-day provider window to the shifts of a single day.
///
/// The provider hands back a superset window (typically 7 days); the engine
/// selects the target day by exact start-date match.
pub fn shifts_on_date(shifts: &[ShiftRecord], date: NaiveDate) -> Vec<ShiftRecord> {
    shifts
        .iter()
        .filter(|shift| shift.starts_on(date))
        .cloned()
        .collect()
}

/// Applies the search, status, and shift-type filters to a day's shifts.
///
/// Stages run in a fixed order, each a pure narrowing pass over the
/// previous stage's output. The department filter is deliberately absent;
/// see [`RotaFilters::department`].
pub fn filter_shifts(
    shifts: &[ShiftRecord],
    filters: &RotaFilters,
    reference: DateTime<Utc>,
) -> Vec<ShiftRecord> {
    let mut remaining: Vec<ShiftRecord> = shifts.to_vec();

    let needle = filters.search.trim().to_lowercase();
    if !needle.is_empty() {
        remaining.retain(|shift| matches_search(shift, &needle));
    }

    if let StatusFilter::Is(wanted) = filters.status {
        remaining.retain(|shift| classify_attendance(shift, reference).status == wanted);
    }

    if let ShiftTypeFilter::Is(wanted) = filters.shift_type {
        remaining.retain(|shift| classify_shift_type(shift) == wanted);
    }

    remaining
}

/// Case-insensitive substring match against the assigned staff name.
///
/// Unassigned shifts never match a non-empty search.
fn matches_search(shift: &ShiftRecord, needle: &str) -> bool {
    if shift.is_unassigned() {
        return false;
    }
    shift
        .staff_name
        .as_ref()
        .map(|name| name.to_lowercase().contains(needle))
        .unwrap_or(false)
}
