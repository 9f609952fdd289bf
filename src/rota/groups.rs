//! Department grouping.
//!
//! This module partitions a filtered day's shifts into ordered, named
//! groups for display: open shifts first, then regular departments, then
//! staff worked in from other locations. The algorithm is an explicit
//! classify-then-sort so the ordering is a visible policy rather than an
//! accident of map iteration order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;
use crate::rota::filter::DepartmentFilter;

/// Group id for the open/unassigned shifts group.
pub const UNASSIGNED_GROUP_ID: &str = "unassigned-shifts";

/// Group id for the other-locations group.
pub const OTHER_LOCATIONS_GROUP_ID: &str = "other-locations";

/// Group id for the agency group.
pub const AGENCY_GROUP_ID: &str = "agency";

/// Department label used when a shift carries no department or team.
pub const DEFAULT_DEPARTMENT: &str = "General";

/// The type of a department group, which drives its styling and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    /// A regular department at this location.
    Regular,
    /// Agency-sourced staff.
    Agency,
    /// Staff worked in from other locations.
    OtherLocations,
    /// Shifts with no staff member assigned.
    Unassigned,
}

/// An ordered, named group of shifts for one rota day.
///
/// Derived and transient: groups are rebuilt from scratch on every
/// computation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentGroup {
    /// Stable id, e.g. `nursing` or `unassigned-shifts`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Group type.
    pub kind: GroupKind,
    /// The shifts in this group, in input order.
    pub shifts: Vec<ShiftRecord>,
    /// Staff count: distinct assigned staff for regular departments, raw
    /// shift count for the unassigned, agency, and other-locations groups.
    pub staff_count: usize,
}

/// Derives a group id from a department name: lower-cased, with internal
/// whitespace runs replaced by a single hyphen.
///
/// # Examples
///
/// ```
/// use rota_engine::rota::department_group_id;
///
/// assert_eq!(department_group_id("Nursing"), "nursing");
/// assert_eq!(department_group_id("Night  Support Team"), "night-support-team");
/// ```
pub fn department_group_id(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Partitions filtered shifts into ordered department groups.
///
/// Each shift lands in exactly one group, checked in priority order:
/// unassigned shifts, then external staff, then a regular department keyed
/// by the department label, the first team label, or [`DEFAULT_DEPARTMENT`].
///
/// Ordering of the result: the unassigned group first when non-empty (the
/// highest-priority operational signal), regular departments sorted by
/// name, the agency group when populated, and the other-locations group
/// last. The other-locations group is included only while the department
/// filter is `all` or `other-locations`; every other group ignores the
/// department filter.
pub fn bucketize_departments(
    shifts: &[ShiftRecord],
    department_filter: &DepartmentFilter,
) -> Vec<DepartmentGroup> {
    let mut unassigned: Vec<ShiftRecord> = Vec::new();
    let mut other_locations: Vec<ShiftRecord> = Vec::new();
    let mut regular: HashMap<String, Vec<ShiftRecord>> = HashMap::new();
    // Nothing on the raw records distinguishes agency-sourced shifts, so no
    // classification rule routes here; the group keeps its slot in the
    // ordering and the type vocabulary.
    let agency: Vec<ShiftRecord> = Vec::new();

    for shift in shifts {
        if shift.is_unassigned() {
            unassigned.push(shift.clone());
        } else if shift.is_external_staff {
            other_locations.push(shift.clone());
        } else {
            regular
                .entry(department_name(shift))
                .or_default()
                .push(shift.clone());
        }
    }

    let mut groups = Vec::new();

    if !unassigned.is_empty() {
        groups.push(DepartmentGroup {
            id: UNASSIGNED_GROUP_ID.to_string(),
            name: "Unassigned Shifts".to_string(),
            kind: GroupKind::Unassigned,
            staff_count: unassigned.len(),
            shifts: unassigned,
        });
    }

    let mut names: Vec<String> = regular.keys().cloned().collect();
    names.sort();
    for name in names {
        let shifts = regular.remove(&name).unwrap_or_default();
        let staff_count = distinct_staff_count(&shifts);
        groups.push(DepartmentGroup {
            id: department_group_id(&name),
            name,
            kind: GroupKind::Regular,
            shifts,
            staff_count,
        });
    }

    if !agency.is_empty() {
        groups.push(DepartmentGroup {
            id: AGENCY_GROUP_ID.to_string(),
            name: "Agency".to_string(),
            kind: GroupKind::Agency,
            staff_count: agency.len(),
            shifts: agency,
        });
    }

    let show_other_locations = matches!(
        department_filter,
        DepartmentFilter::All | DepartmentFilter::OtherLocations
    );
    if show_other_locations && !other_locations.is_empty() {
        groups.push(DepartmentGroup {
            id: OTHER_LOCATIONS_GROUP_ID.to_string(),
            name: "Other Locations".to_string(),
            kind: GroupKind::OtherLocations,
            staff_count: other_locations.len(),
            shifts: other_locations,
        });
    }

    groups
}

/// Resolves the department a shift belongs to.
fn department_name(shift: &ShiftRecord) -> String {
    if let Some(department) = shift.department.as_deref()
        && !department.trim().is_empty()
    {
        return department.to_string();
    }
    if let Some(team) = shift.teams.first()
        && !team.trim().is_empty()
    {
        return team.to_string();
    }
    DEFAULT_DEPARTMENT.to_string()
}

/// Counts distinct assigned staff ids in a group.
fn distinct_staff_count(shifts: &[ShiftRecord]) -> usize {
    shifts
        .iter()
        .filter_map(|shift| shift.staff_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}
