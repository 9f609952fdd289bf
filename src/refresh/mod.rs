//! Live-refresh coordination.
//!
//! This module keeps a rota day view fresh: a poll timer that only runs
//! while auto-refresh is enabled and the page is visible, an immediate
//! refetch when visibility is regained, a staleness ticker that keeps the
//! "last updated" text accurate, and coalescing of concurrent refetch
//! triggers into a single in-flight fetch.

mod clock;
mod coordinator;
mod staleness;

pub use clock::{Clock, SystemClock};
pub use coordinator::{RefreshConfig, RefreshCoordinator, RotaFetcher};
pub use staleness::staleness_text;
