//! HTTP API module for the tariff rate engine.
//!
//! A thin adapter over [`PricingDispatcher`](crate::dispatch::PricingDispatcher):
//! it parses the request body, dispatches, and maps engine errors to HTTP
//! statuses. No pricing logic lives here.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PriceRequest;
pub use response::{ApiError, ApiErrorResponse, PriceResponse};
pub use state::AppState;
