//! # ImagePay-RS
//!
//! Pay-per-use image transformation gateway.
//!
//! A user photo and a text prompt are forwarded to a hosted image-editing
//! model; the model's output, whatever its shape, is reduced to a single
//! absolute image URL. A wallet micropayment gates each transformation.
//!
//! ## Features
//!
//! - **Transformation endpoint**: `POST /api/transform` multipart upload
//! - **Output normalization**: bare strings, URL accessors, `{url}` objects,
//!   lists and file outputs all yield the same `imageUrl`
//! - **Payment gate**: initiate, optionally verify, then transform; failures
//!   after payment carry the receipt id for reconciliation
//! - **Fail-open verification**: receipt status checks are advisory unless
//!   strict verification is configured
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use imagepay_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Client Mode
//!
//! ```rust,no_run
//! use imagepay_rs::core::payment::{HttpPaymentProvider, PaymentGate};
//! use imagepay_rs::core::types::ImageUpload;
//! use imagepay_rs::sdk::TransformClient;
//! use imagepay_rs::Config;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = TransformClient::new("http://localhost:3000", Duration::from_secs(180))?;
//!     let payments = HttpPaymentProvider::new(
//!         &config.payment().api_base,
//!         client.http_client().clone(),
//!     )?;
//!
//!     let mut gate = PaymentGate::new(
//!         Arc::new(payments),
//!         Arc::new(client),
//!         config.payment().clone(),
//!     );
//!     let image = ImageUpload::from_path("cat.png").await?;
//!     let state = gate.submit(Some(image), "Make it a watercolor").await?;
//!     println!("{}", state);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod sdk;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::normalizer::normalize;
pub use core::output::{FileOutput, ProviderOutput, UrlAccessor, UrlValue};
pub use core::payment::{GateEvent, GateState, PaymentGate, PaymentProvider, PaymentReceipt};
pub use core::providers::{ImageProvider, ProviderError, ReplicateProvider};
pub use core::transform::{ImageTransformer, TransformService};
pub use core::types::{ImageUpload, NormalizedResult, TransformRequest};
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// A minimal gateway: configuration plus HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!(
            model = %self.config.provider().model,
            testnet = self.config.payment().testnet,
            "Starting ImagePay Gateway"
        );

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
