//! Client SDK
//!
//! Talks to a running gateway over HTTP. [`TransformClient`] implements
//! [`ImageTransformer`](crate::core::transform::ImageTransformer), so it can
//! be plugged into a [`PaymentGate`](crate::core::payment::PaymentGate).

pub mod client;
pub mod download;

pub use client::{TRANSFORM_PATH, TransformClient};
pub use download::download;
