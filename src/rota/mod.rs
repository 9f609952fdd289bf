//! Derivation pipeline for a single rota day.
//!
//! This module contains the pure computations of the engine: attendance
//! classification, shift-type detection, the filter pipeline, department
//! grouping, day-level statistics, and the composed computation pass. All
//! functions here are deterministic and side-effect free; re-running any of
//! them on identical inputs yields identical output.

mod attendance;
mod filter;
mod groups;
mod shift_type;
mod stats;
mod view;

pub use attendance::{AttendanceMark, AttendanceStatus, classify_attendance};
pub use filter::{
    DepartmentFilter, RotaFilters, ShiftTypeFilter, StatusFilter, filter_shifts, shifts_on_date,
};
pub use groups::{
    AGENCY_GROUP_ID, DEFAULT_DEPARTMENT, DepartmentGroup, GroupKind, OTHER_LOCATIONS_GROUP_ID,
    UNASSIGNED_GROUP_ID, bucketize_departments, department_group_id,
};
pub use shift_type::{DEFAULT_START_HOUR, NIGHT_END_HOUR, NIGHT_START_HOUR, ShiftType, classify_shift_type};
pub use stats::{DailyStats, aggregate_daily_stats};
pub use view::{DayView, build_day_view};
