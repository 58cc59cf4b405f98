//! Utility modules for the gateway
//!
//! - **error**: Error types and HTTP error responses
//! - **logging**: Tracing subscriber setup shared by the binaries

pub mod error;
pub mod logging;
