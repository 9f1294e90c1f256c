// src/main.rs
mod config;
mod handlers;
mod models;
mod probe;
mod storage;
mod utils;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::sync::Arc;

use crate::config::Config;
use crate::storage::memory::MemoryStore;
use crate::storage::mongo::MongoStore;
use crate::storage::ServerStore;
use crate::utils::{CreateRateLimiter, StatusRateLimiter};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::from_env();
    if config.google_client_id.is_empty() {
        warn!("GOOGLE_CLIENT_ID is not set; Google login will not work");
    }
    if config.session_secret.len() < 32 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "SESSION_SECRET must be at least 32 bytes",
        ));
    }
    let session_key = Key::derive_from(config.session_secret.as_bytes());

    // Pick the record store: MongoDB when configured, in-memory otherwise.
    let store: Arc<dyn ServerStore> = match &config.mongodb_uri {
        Some(uri) => {
            let store = MongoStore::connect(uri, &config.mongodb_db).await.map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to connect to MongoDB: {}", e),
                )
            })?;
            Arc::new(store)
        }
        None => {
            warn!("MONGODB_URI is not set; server records will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store_data: web::Data<dyn ServerStore> = web::Data::from(store);

    // Get bind address and port from environment or use defaults
    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind = format!("{}:{}", bind_address, port);

    // Set up rate limiters using config
    let status_rate_limiter = web::Data::new(StatusRateLimiter::new(config.status_quota()));
    let create_rate_limiter = web::Data::new(CreateRateLimiter::new(config.create_quota()));

    let secure_cookies = config.secure_cookies;
    let config_data = web::Data::new(config);

    info!("Starting dashboard on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(config_data.clone())
            .app_data(status_rate_limiter.clone())
            .app_data(create_rate_limiter.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_name("mcdash-session".to_string())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .route("/", web::get().to(handlers::index::index))
            .route("/auth/google", web::get().to(handlers::auth::login))
            .route("/auth/google/callback", web::get().to(handlers::auth::callback))
            .route("/logout", web::get().to(handlers::auth::logout))
            .route("/servers", web::post().to(handlers::servers::create_server))
            .route("/status", web::get().to(handlers::status::get_status))
            .route("/search", web::get().to(handlers::status::search))
    })
        .bind(&bind)?
        .run().await
}
