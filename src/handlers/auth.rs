// src/handlers/auth.rs
use actix_session::Session;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{debug, error, info};
use reqwest::Url;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Config;
use crate::models::user::{AuthenticatedUser, SESSION_USER_KEY};
use crate::utils::RequestError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const OAUTH_SCOPE: &str = "openid email profile";

// Nonce stored in the session between /auth/google and the callback.
const OAUTH_STATE_KEY: &str = "oauth_state";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn login(
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, RequestError> {
    let state = Uuid::new_v4().simple().to_string();
    session
        .insert(OAUTH_STATE_KEY, &state)
        .map_err(|e| RequestError::Session(e.to_string()))?;

    let url = Url::parse_with_params(
        GOOGLE_AUTH_URL,
        &[
            ("client_id", config.google_client_id.as_str()),
            ("redirect_uri", config.google_redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", OAUTH_SCOPE),
            ("state", state.as_str()),
        ],
    )
    .map_err(|e| RequestError::IdentityProvider(e.to_string()))?;

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, url.to_string()))
        .finish())
}

pub async fn callback(
    config: web::Data<Config>,
    session: Session,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, RequestError> {
    if let Some(reason) = &query.error {
        // The user backed out of the consent screen. Nothing to clean up.
        debug!("Google returned an OAuth error: {}", reason);
        return Ok(redirect_home());
    }

    let expected_state = session
        .get::<String>(OAUTH_STATE_KEY)
        .map_err(|e| RequestError::Session(e.to_string()))?;
    session.remove(OAUTH_STATE_KEY);
    match (&query.state, &expected_state) {
        (Some(got), Some(expected)) if got == expected => {}
        _ => return Err(RequestError::StateMismatch),
    }

    let code = query.code.as_deref().ok_or(RequestError::MissingCode)?;

    let http = reqwest::Client::new();
    let token_response = http
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.google_redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            error!("Failed to reach Google token endpoint: {}", e);
            RequestError::IdentityProvider(e.to_string())
        })?;

    if !token_response.status().is_success() {
        let status = token_response.status();
        let body = token_response.text().await.unwrap_or_default();
        error!("Token exchange rejected with {}: {}", status, body);
        return Err(RequestError::IdentityProvider(format!(
            "token exchange failed with status {}",
            status
        )));
    }

    let token: TokenResponse = token_response.json().await.map_err(|e| {
        error!("Failed to parse token response: {}", e);
        RequestError::IdentityProvider(e.to_string())
    })?;

    let profile_response = http
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(&token.access_token)
        .send()
        .await
        .map_err(|e| {
            error!("Failed to reach Google userinfo endpoint: {}", e);
            RequestError::IdentityProvider(e.to_string())
        })?;

    let profile: GoogleProfile = profile_response.json().await.map_err(|e| {
        error!("Failed to parse userinfo response: {}", e);
        RequestError::IdentityProvider(e.to_string())
    })?;

    let GoogleProfile { id, name, email } = profile;
    let display_name = name.or(email).unwrap_or_else(|| format!("user-{}", id));
    let user = AuthenticatedUser { id, display_name };

    session
        .insert(SESSION_USER_KEY, &user)
        .map_err(|e| RequestError::Session(e.to_string()))?;
    session.renew();

    info!("{} logged in via Google ({})", user.display_name, user.id);
    Ok(redirect_home())
}

pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    redirect_home()
}

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, "/"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::storage::CookieSessionStore;
    use actix_session::SessionMiddleware;
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn test_config() -> Config {
        Config {
            google_client_id: "test-client".to_string(),
            ..Config::default()
        }
    }

    fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_secure(false)
            .build()
    }

    #[actix_web::test]
    async fn login_redirects_to_google_consent() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .wrap(session_middleware())
                .route("/auth/google", web::get().to(login)),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/auth/google").to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a Location header")
            .to_str()
            .unwrap();
        assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(location.contains("client_id=test-client"));
        assert!(location.contains("state="));
        assert!(
            resp.headers().get(header::SET_COOKIE).is_some(),
            "state nonce should be written to the session"
        );
    }

    #[actix_web::test]
    async fn callback_rejects_unknown_state() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .wrap(session_middleware())
                .route("/auth/google/callback", web::get().to(callback)),
        )
        .await;

        // No prior /auth/google request, so the session holds no nonce.
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/google/callback?code=abc&state=forged")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn callback_with_provider_error_redirects_home() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .wrap(session_middleware())
                .route("/auth/google/callback", web::get().to(callback)),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/google/callback?error=access_denied")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
            "/"
        );
    }

    #[actix_web::test]
    async fn logout_redirects_home() {
        let app = test::init_service(
            App::new()
                .wrap(session_middleware())
                .route("/logout", web::get().to(logout)),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
            "/"
        );
    }
}
