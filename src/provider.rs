//! External collaborator interfaces.
//!
//! The engine never talks to the staffing platform directly; it consumes
//! these ports. Implementations live with the transport layer and own
//! retry policy, caching, and request deduplication. A failed fetch is
//! surfaced as a typed error and never clears previously derived views.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RotaResult;
use crate::models::{ShiftRecord, StaffRecord};

/// One fetched window of raw rota data.
///
/// The window is a superset of any single day (typically 7 days); the
/// engine narrows it locally with [`crate::rota::shifts_on_date`].
#[derive(Debug, Clone, PartialEq)]
pub struct RotaWindow {
    /// All shifts in the window.
    pub shifts: Vec<ShiftRecord>,
    /// The staff rostered at the location.
    pub staff: Vec<StaffRecord>,
}

/// The remote data provider.
#[async_trait]
pub trait RotaProvider: Send + Sync {
    /// Fetches shifts and staff for a location window.
    ///
    /// # Errors
    ///
    /// [`crate::error::RotaError::Transport`] on network or server
    /// failures, [`crate::error::RotaError::Unauthorized`] when the
    /// session is rejected.
    async fn fetch_rota_window(
        &self,
        location_id: &str,
        sublocation_id: &str,
        start_date: NaiveDate,
        window_days: u32,
        rota_id: Option<&str>,
    ) -> RotaResult<RotaWindow>;
}

/// Mutation endpoints invoked by orchestrating code reacting to the
/// derived views.
///
/// Every mutation invalidates the provider's cache on its side, so the
/// next [`RotaProvider::fetch_rota_window`] reflects the change; the
/// engine only consumes whatever fresh snapshot it receives.
#[async_trait]
pub trait RotaMutations: Send + Sync {
    /// Assigns a staff member to a shift.
    async fn assign_staff(&self, shift_id: &str, staff_id: &str) -> RotaResult<()>;

    /// Removes the assigned staff member from a shift.
    async fn unassign_staff(&self, shift_id: &str) -> RotaResult<()>;

    /// Publishes the given shifts.
    async fn publish_shifts(&self, shift_ids: &[String]) -> RotaResult<()>;

    /// Updates the shift-leader and act-up flags on a shift.
    async fn set_shift_flags(
        &self,
        shift_id: &str,
        is_shift_leader: bool,
        is_act_up: bool,
    ) -> RotaResult<()>;
}
