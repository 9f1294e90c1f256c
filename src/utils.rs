// src/utils.rs
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::fmt;
use std::net::IpAddr;

use crate::storage::StoreError;

#[derive(Debug)]
pub enum RequestError {
    Unauthorized,
    MissingClientIp,
    RateLimitExceeded,
    MissingCode,
    StateMismatch,
    IdentityProvider(String),
    Session(String),
    Store(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::MissingClientIp => write!(f, "Failed to extract client IP"),
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            Self::MissingCode => write!(f, "Missing code in callback query"),
            Self::StateMismatch => write!(f, "OAuth state mismatch"),
            Self::IdentityProvider(message) => write!(f, "Identity provider error: {}", message),
            Self::Session(message) => write!(f, "Session error: {}", message),
            // The raw backend message, forwarded to the client as-is.
            Self::Store(message) => write!(f, "{}", message),
        }
    }
}

impl ResponseError for RequestError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Unauthorized => HttpResponse::Unauthorized().body(self.to_string()),
            Self::RateLimitExceeded => HttpResponse::TooManyRequests().body(self.to_string()),
            Self::MissingClientIp | Self::MissingCode | Self::StateMismatch => {
                HttpResponse::BadRequest().body(self.to_string())
            }
            Self::IdentityProvider(_) => HttpResponse::BadGateway().body(self.to_string()),
            Self::Session(_) | Self::Store(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for RequestError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

pub fn client_ip(req: &HttpRequest) -> Result<IpAddr, RequestError> {
    // Behind a proxy the peer address is the proxy itself, so prefer the
    // first X-Forwarded-For hop when present.
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(value) = forwarded_for.to_str() {
            if let Some(first) = value.split(',').next() {
                if let Ok(ip) = first.trim().parse::<IpAddr>() {
                    return Ok(ip);
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip())
        .ok_or(RequestError::MissingClientIp)
}

type KeyedIpLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

// App data is looked up by type, so each quota needs its own wrapper type to
// keep the limiters distinct.
pub struct StatusRateLimiter(KeyedIpLimiter);

impl StatusRateLimiter {
    pub fn new(quota: Quota) -> Self {
        Self(RateLimiter::keyed(quota))
    }

    pub fn check(&self, ip: &IpAddr) -> bool {
        self.0.check_key(ip).is_ok()
    }
}

pub struct CreateRateLimiter(KeyedIpLimiter);

impl CreateRateLimiter {
    pub fn new(quota: Quota) -> Self {
        Self(RateLimiter::keyed(quota))
    }

    pub fn check(&self, ip: &IpAddr) -> bool {
        self.0.check_key(ip).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 70.41.3.18"))
            .to_http_request();
        assert_eq!(client_ip(&req).unwrap(), "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn client_ip_falls_back_to_peer_addr() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.4:51000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req).unwrap(), "192.0.2.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn client_ip_fails_without_any_source() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(client_ip(&req), Err(RequestError::MissingClientIp)));
    }

    #[test]
    fn store_errors_keep_the_backend_message() {
        let err = RequestError::Store("E11000 duplicate key".to_string());
        assert_eq!(err.to_string(), "E11000 duplicate key");
    }
}
