//! Payment-gated transformation client
//!
//! Pays for one transformation through the payment service, sends the image
//! and prompt to a running gateway and prints the resulting URL.

use anyhow::{Context, Result, bail};
use clap::Parser;
use imagepay_rs::Config;
use imagepay_rs::core::payment::{GateState, HttpPaymentProvider, PaymentGate};
use imagepay_rs::core::types::ImageUpload;
use imagepay_rs::sdk::{self, TransformClient};
use imagepay_rs::utils::logging::{LogFormat, init_tracing};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "imagepay", version, about = "Pay for and run one image transformation")]
struct Args {
    /// Image to transform (PNG, JPG, JPEG, WebP)
    #[arg(short, long)]
    image: PathBuf,

    /// Transformation prompt
    #[arg(short, long)]
    prompt: String,

    /// Gateway base URL
    #[arg(long, env = "GATEWAY_URL", default_value = "http://localhost:3000")]
    gateway: String,

    /// Optional YAML configuration for payment settings
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Save the transformed image to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the receipt status lookup before transforming
    #[arg(long)]
    skip_verify: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 180)]
    timeout: u64,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.log_format, "warn");

    let config = match &args.config {
        Some(path) => Config::from_file(path).await,
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;

    let mut payment_config = config.payment().clone();
    if args.skip_verify {
        payment_config.verify_before_transform = false;
    }

    let client = TransformClient::new(&args.gateway, Duration::from_secs(args.timeout))?;
    let payments = HttpPaymentProvider::new(&payment_config.api_base, client.http_client().clone())
        .context("Invalid payment service URL")?;
    let mut gate = PaymentGate::new(
        Arc::new(payments),
        Arc::new(client.clone()),
        payment_config.clone(),
    );

    let image = ImageUpload::from_path(&args.image)
        .await
        .with_context(|| format!("Cannot read {}", args.image.display()))?;

    println!(
        "Paying {} to {}{}...",
        payment_config.amount,
        payment_config.recipient,
        if payment_config.testnet { " (testnet)" } else { "" }
    );

    match gate.submit(Some(image), &args.prompt).await? {
        GateState::Complete { receipt, result } => {
            info!(payment_id = %receipt.id, "Transformation complete");
            println!("Payment ID: {}", receipt.id);
            println!("Image URL:  {}", result.image_url);

            if let Some(path) = &args.output {
                let bytes = sdk::download(result, client.http_client(), path).await?;
                println!("Saved {} bytes to {}", bytes, path.display());
            }
            Ok(())
        }
        GateState::Error { message, .. } => bail!("{}", message),
        state => bail!("Payment gate stopped in unexpected state {}", state),
    }
}
