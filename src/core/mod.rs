//! Core functionality for the gateway
//!
//! Request types, provider adapters, output normalization, payments and the
//! transformation service that ties them together.

pub mod normalizer;
pub mod output;
pub mod payment;
pub mod providers;
pub mod transform;
pub mod types;
