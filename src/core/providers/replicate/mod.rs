//! Replicate-style predictions API

mod client;
mod provider;

pub use client::{ModelRef, Prediction, PredictionStatus, ReplicateClient};
pub use provider::ReplicateProvider;
