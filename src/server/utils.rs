//! Process signals and bind diagnostics for the gateway server

use crate::utils::error::GatewayError;
use std::io::ErrorKind;
use tracing::{info, warn};

/// Resolves on Ctrl+C or SIGTERM
pub(crate) async fn shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => info!("Ctrl+C received, draining in-flight transformations"),
        _ = terminate() => info!("SIGTERM received, draining in-flight transformations"),
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Turn a failed `bind` into a server error with a hint for the common causes
pub(crate) fn bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
    let hint = match error.kind() {
        ErrorKind::AddrInUse => match port.checked_add(1) {
            Some(next) => format!(
                "port {} is already in use, stop the other process or set GATEWAY_PORT={}",
                port, next
            ),
            None => format!(
                "port {} is already in use, set GATEWAY_PORT to a free port",
                port
            ),
        },
        ErrorKind::PermissionDenied => format!(
            "permission denied for port {}, use GATEWAY_PORT=1024 or higher",
            port
        ),
        _ => error.to_string(),
    };

    GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, hint))
}
