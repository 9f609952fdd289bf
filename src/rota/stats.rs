//! Day-level statistics.
//!
//! This module aggregates summary counts and hours over the same filtered
//! shift set the bucketizer sees, so the two views always agree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{ShiftRecord, StaffRecord};

/// Summary statistics for one rota day.
///
/// Derived and transient, recomputed on every pass. `unassigned_count` is
/// computed with the same predicate the bucketizer uses for its unassigned
/// group, so the two never diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Distinct assigned staff across the filtered shifts.
    pub staff_count: usize,
    /// Sum of per-shift worked hours, rounded to one decimal place.
    pub total_hours: Decimal,
    /// Shifts with no staff member assigned.
    pub unassigned_count: usize,
    /// Shifts whose publication status is not the reserved published value.
    pub unpublished_count: usize,
    /// Distinct rostered staff with a leave interval containing the day.
    pub staff_on_leave_count: usize,
}

/// Aggregates day-level statistics over the filtered shifts and the staff
/// roster.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rota_engine::models::ShiftRecord;
/// use rota_engine::rota::aggregate_daily_stats;
/// use rust_decimal::Decimal;
///
/// let shift: ShiftRecord = serde_json::from_str(r#"{
///     "id": "shift_001",
///     "staff_id": "staff_001",
///     "job_title": "Care Assistant",
///     "start_time": "2026-02-10T22:00:00Z",
///     "end_time": "2026-02-11T06:00:00Z",
///     "break_minutes": 30,
///     "publication_status": 1
/// }"#).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
/// let stats = aggregate_daily_stats(&[shift], &[], date);
/// assert_eq!(stats.total_hours, Decimal::new(75, 1)); // 7.5
/// assert_eq!(stats.staff_count, 1);
/// ```
pub fn aggregate_daily_stats(
    shifts: &[ShiftRecord],
    staff_roster: &[StaffRecord],
    selected_date: NaiveDate,
) -> DailyStats {
    let staff_count = shifts
        .iter()
        .filter_map(|shift| shift.staff_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let total_hours: Decimal = shifts.iter().map(ShiftRecord::worked_hours).sum();

    let unassigned_count = shifts.iter().filter(|shift| shift.is_unassigned()).count();

    let unpublished_count = shifts.iter().filter(|shift| !shift.is_published()).count();

    let staff_on_leave_count = staff_roster
        .iter()
        .filter(|staff| staff.is_on_leave(selected_date))
        .count();

    DailyStats {
        staff_count,
        total_hours: total_hours.round_dp(1),
        unassigned_count,
        unpublished_count,
        staff_on_leave_count,
    }
}
