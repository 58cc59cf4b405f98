//! ImagePay-RS gateway server

#![allow(missing_docs)]

use clap::Parser;
use imagepay_rs::server;
use imagepay_rs::utils::logging::{LogFormat, init_tracing};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "Paid image transformation gateway")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "GATEWAY_CONFIG",
        default_value = server::builder::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.log_format, "info");

    match server::builder::run_server(&args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
