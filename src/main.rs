use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use roomie_match::config::Settings;
use roomie_match::core::Matcher;
use roomie_match::routes::{
    self,
    auth::JwtKeys,
    error::{handle_json_payload_error, handle_query_payload_error},
    AppState,
};
use roomie_match::services::{MemoryStore, UserStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the configured level can apply
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL and LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Roomie matching service...");

    // Initialize storage
    let store: Arc<dyn UserStore> = match &settings.storage.seed_path {
        Some(path) => Arc::new(MemoryStore::from_seed_file(path).await.map_err(|e| {
            error!("Failed to load seed data: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?),
        None => {
            info!("No seed file configured, starting with an empty store");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = AppState {
        store,
        matcher: Matcher::new(),
    };
    let jwt_keys = web::Data::new(JwtKeys::from_secret(&settings.auth.jwt_secret));

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(jwt_keys.clone())
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
