//! Data models for the rota engine.
//!
//! This module contains the raw record types the engine computes over:
//! scheduled shifts and rostered staff. Everything derived from these
//! (attendance, groups, statistics) lives in [`crate::rota`].

mod shift;
mod staff;

pub use shift::{PUBLISHED_STATUS, ShiftRecord};
pub use staff::{LeaveInterval, StaffRecord};
