//! End-to-end tests for imagepay-rs
//!
//! These tests make real provider calls and require API tokens.
//! Run with: cargo test -- --ignored
//!
//! Required environment variables:
//! - REPLICATE_API_TOKEN: For Replicate tests
