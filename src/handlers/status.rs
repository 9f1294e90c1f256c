// src/handlers/status.rs
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error};
use serde::Deserialize;

use crate::config::Config;
use crate::probe::probe_all;
use crate::storage::ServerStore;
use crate::utils::{client_ip, RequestError, StatusRateLimiter};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

pub async fn get_status(
    req: HttpRequest,
    store: web::Data<dyn ServerStore>,
    config: web::Data<Config>,
    rate_limiter: web::Data<StatusRateLimiter>,
) -> Result<HttpResponse, RequestError> {
    let peer_ip = client_ip(&req)?;
    if !rate_limiter.check(&peer_ip) {
        error!("Rate limit exceeded for status for ip: {}", peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }

    let records = store.list().await?;
    debug!("Probing {} servers for status", records.len());

    let views = probe_all(&records, config.probe_timeout()).await;
    Ok(HttpResponse::Ok().json(views))
}

pub async fn search(
    req: HttpRequest,
    store: web::Data<dyn ServerStore>,
    config: web::Data<Config>,
    query: web::Query<SearchQuery>,
    rate_limiter: web::Data<StatusRateLimiter>,
) -> Result<HttpResponse, RequestError> {
    let peer_ip = client_ip(&req)?;
    if !rate_limiter.check(&peer_ip) {
        error!("Rate limit exceeded for search for ip: {}", peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }

    let records = store.find_by_name(&query.q).await?;
    debug!("Query {:?} matched {} servers", query.q, records.len());

    let views = probe_all(&records, config.probe_timeout()).await;
    Ok(HttpResponse::Ok().json(views))
}
