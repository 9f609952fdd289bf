//! Daily Rota Aggregation & Attendance Engine
//!
//! This crate provides the core logic of a shift-rota dashboard for
//! care-sector staffing: attendance classification, shift-type detection,
//! filtering, department grouping, day-level statistics, and a
//! visibility-aware live-refresh coordinator.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod refresh;
pub mod rota;
