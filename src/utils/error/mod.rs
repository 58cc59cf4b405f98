//! Error handling for the gateway
//!
//! All failures of a transformation are caught at the request boundary and
//! converted into a `{ "error": .. }` body with the matching status code.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::ErrorResponse;
pub use types::{GatewayError, Result};
