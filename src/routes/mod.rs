// Route exports
pub mod auth;
pub mod error;
pub mod matches;
pub mod survey;
pub mod users;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::HealthResponse;
use crate::services::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(users::configure)
            .configure(survey::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
