// src/handlers/servers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info};

use crate::models::server::CreateServerRequest;
use crate::models::user::AuthenticatedUser;
use crate::storage::ServerStore;
use crate::utils::{client_ip, CreateRateLimiter, RequestError};

pub async fn create_server(
    req: HttpRequest,
    user: AuthenticatedUser,
    store: web::Data<dyn ServerStore>,
    payload: web::Json<CreateServerRequest>,
    rate_limiter: web::Data<CreateRateLimiter>,
) -> Result<HttpResponse, RequestError> {
    let peer_ip = client_ip(&req)?;
    if !rate_limiter.check(&peer_ip) {
        error!("Rate limit exceeded for server create for ip: {}", peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }

    // Ownership comes from the session, never from the payload.
    let record = payload.into_inner().into_record(user.id.clone());
    let record = store.insert(record).await.map_err(|e| {
        error!("Failed to store server record: {}", e);
        RequestError::from(e)
    })?;

    info!(
        "{} registered {} ({}:{})",
        user.display_name, record.name, record.host, record.port
    );
    Ok(HttpResponse::Ok().json(record))
}
