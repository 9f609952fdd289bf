//! One computation pass over a rota day.
//!
//! This module composes the pure pipeline: window → day → filtered set →
//! {groups, stats, attendance}. Presentation code calls [`build_day_view`]
//! whenever the raw snapshot, the filters, or the reference time changes;
//! the result is freshly derived each time and holds no shared state.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ShiftRecord, StaffRecord};
use crate::rota::attendance::{AttendanceMark, classify_attendance};
use crate::rota::filter::{RotaFilters, filter_shifts, shifts_on_date};
use crate::rota::groups::{DepartmentGroup, bucketize_departments};
use crate::rota::stats::{DailyStats, aggregate_daily_stats};

/// Everything the presentation layer needs for one rota day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    /// The filtered shifts the groups and stats were derived from.
    pub shifts: Vec<ShiftRecord>,
    /// Ordered department groups.
    pub groups: Vec<DepartmentGroup>,
    /// Day-level statistics over the same filtered set.
    pub stats: DailyStats,
    /// Attendance mark per filtered shift, keyed by shift id.
    pub attendance: BTreeMap<String, AttendanceMark>,
}

/// Runs one full computation pass for a rota day.
///
/// Narrows the provider window to the selected date, applies the filter
/// pipeline, and derives groups, stats, and attendance marks from the same
/// filtered set. Deterministic and idempotent: identical inputs always
/// produce an identical view.
pub fn build_day_view(
    window_shifts: &[ShiftRecord],
    staff_roster: &[StaffRecord],
    filters: &RotaFilters,
    selected_date: NaiveDate,
    reference: DateTime<Utc>,
) -> DayView {
    let day_shifts = shifts_on_date(window_shifts, selected_date);
    let filtered = filter_shifts(&day_shifts, filters, reference);

    let groups = bucketize_departments(&filtered, &filters.department);
    let stats = aggregate_daily_stats(&filtered, staff_roster, selected_date);
    let attendance = filtered
        .iter()
        .map(|shift| (shift.id.clone(), classify_attendance(shift, reference)))
        .collect();

    DayView {
        shifts: filtered,
        groups,
        stats,
        attendance,
    }
}
