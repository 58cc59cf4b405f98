//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::payment::HttpPaymentProvider;
use crate::core::providers::ReplicateProvider;
use crate::core::transform::TransformService;
use crate::server::handlers::health_check;
use crate::server::routes;
use crate::server::state::AppState;
use crate::server::utils::{bind_error, shutdown_signal};
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server wired to the configured provider and payment service
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let provider = ReplicateProvider::new(config.provider().clone())?;
        if config.provider().api_token.is_none() {
            warn!("REPLICATE_API_TOKEN is not set, provider calls will be rejected");
        }

        let payment_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server().timeout))
            .build()?;
        let payments = HttpPaymentProvider::new(&config.payment().api_base, payment_client)
            .map_err(|e| GatewayError::Config(format!("Payment config error: {}", e)))?;

        let service = TransformService::new(
            Arc::new(provider),
            Arc::new(payments),
            config.payment().clone(),
        );

        Ok(Self::with_state(
            config.server().clone(),
            AppState::new(config.clone(), Arc::new(service)),
        ))
    }

    /// Create a server around prebuilt state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.gateway.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
                cors_config.validate().unwrap_or_else(|e| {
                    warn!(error = %e, "CORS Configuration Warning");
                });
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            cors = cors
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allow_any_header()
                .max_age(cors_config.max_age as usize);
        }

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "ImagePay-RS")))
            .route("/health", web::get().to(health_check))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.worker_count();
        let timeout = Duration::from_secs(self.config.timeout);

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .client_request_timeout(timeout)
            .disable_signals()
            .bind(&bind_addr)
            .map_err(|e| bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let handle = server.handle();
        tokio::spawn(async move {
            shutdown_signal().await;
            handle.stop(true).await;
        });

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
