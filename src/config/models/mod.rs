//! Configuration data models
//!
//! This module defines all configuration structures used by the gateway.

#![allow(missing_docs)]

pub mod gateway;
pub mod payment;
pub mod provider;
pub mod server;

// Re-export all configuration types
pub use gateway::*;
pub use payment::*;
pub use provider::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum upload size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default maximum size of a text form field in bytes
pub fn default_max_text_field_size() -> usize {
    16 * 1024
}

/// Default provider API base
pub fn default_provider_api_base() -> String {
    "https://api.replicate.com".to_string()
}

/// Default image-editing model reference
pub fn default_model() -> String {
    "prunaai/hidream-e1.1:433436facdc1172b6efcb801eb6f345d7858a32200d24e5febaccfb4b44ad66f"
        .to_string()
}

/// Default deadline for a prediction, in seconds
pub fn default_provider_timeout() -> u64 {
    120
}

/// Default delay between prediction polls, in milliseconds
pub fn default_poll_interval_ms() -> u64 {
    1000
}

/// Default payment service base
pub fn default_payment_api_base() -> String {
    "http://localhost:4000".to_string()
}

/// Default payment recipient address
pub fn default_recipient() -> String {
    "0xAbF01df9428EaD5418473A7c91244826A3Af23b3".to_string()
}

/// Default price per transformation
pub fn default_amount() -> String {
    "0.20".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
