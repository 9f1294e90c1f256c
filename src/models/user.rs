// src/models/user.rs
use actix_session::SessionExt;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::utils::RequestError;

pub const SESSION_USER_KEY: &str = "user";

// Minimal identity kept in the session: the provider's stable id and a name
// to show in logs and on the page. The raw provider profile is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub display_name: String,
}

// Auth gate for mutating endpoints: extracting an AuthenticatedUser fails the
// request with 401 before the handler body runs.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        ready(match session.get::<AuthenticatedUser>(SESSION_USER_KEY) {
            Ok(Some(user)) => Ok(user),
            _ => Err(RequestError::Unauthorized.into()),
        })
    }
}
