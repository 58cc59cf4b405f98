//! HTTP route modules

pub mod transform;

use actix_web::web;

/// Configure transformation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").route("/transform", web::post().to(transform::transform_image)),
    );
}
