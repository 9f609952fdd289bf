//! HTTP API for the rota engine.
//!
//! Exposes one computation pass over a posted snapshot. The heavy lifting
//! happens in [`crate::rota`]; this layer only decodes requests, runs the
//! pass, and encodes the result.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::DayViewRequest;
pub use response::{ApiError, ApiErrorResponse, DayViewResponse};
pub use state::AppState;
