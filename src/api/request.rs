//! Request types for the rota engine API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ShiftRecord, StaffRecord};
use crate::rota::RotaFilters;

/// Request body for `POST /rota/day`.
///
/// Carries the raw snapshot to compute over. The shift list may span a
/// multi-day window; the engine narrows it to `date` locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewRequest {
    /// The rota day to compute.
    pub date: NaiveDate,
    /// Reference instant for attendance classification. Defaults to the
    /// server's current time.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    /// Applied filters. Defaults to all-pass filters.
    #[serde(default)]
    pub filters: RotaFilters,
    /// Raw shift records, as fetched from the data provider.
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
    /// The staff roster for the location.
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
}
