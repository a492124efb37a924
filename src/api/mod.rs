//! HTTP API module for the Tip-Pool Engine.
//!
//! This module exposes the allocation engine as REST endpoints. It performs
//! no persistence; each request computes one tip period and returns.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::AllocationRequest;
pub use response::{AllocationResponse, ApiError, PoolsResponse};
pub use state::AppState;
