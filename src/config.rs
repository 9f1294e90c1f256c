use std::env;
use std::time::Duration;
use std::num::NonZeroU32;
use governor::Quota;

// Default keeps local HTTP logins working; set SESSION_SECRET in any real
// deployment.
const DEV_SESSION_SECRET: &str = "mcdash-dev-session-secret-not-for-production-use";

#[derive(Clone)]
pub struct Config {
    // Identity provider
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,

    // Persistence; no URI means the in-memory fallback store
    pub mongodb_uri: Option<String>,
    pub mongodb_db: String,

    // Sessions
    pub session_secret: String,
    pub secure_cookies: bool,

    // Status probing
    pub probe_timeout_ms: u64,

    // Rate limiting configs
    pub status_period_secs: u64,
    pub status_burst_limit: u32,
    pub create_period_secs: u64,
    pub create_burst_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_client_id: String::new(),
            google_client_secret: String::new(),
            google_redirect_uri: "http://localhost:8080/auth/google/callback".to_string(),
            mongodb_uri: None,
            mongodb_db: "mcdash".to_string(),
            session_secret: DEV_SESSION_SECRET.to_string(),
            secure_cookies: false,
            probe_timeout_ms: 4000,
            status_period_secs: 10,
            status_burst_limit: 30,
            create_period_secs: 60,
            create_burst_limit: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),

            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),

            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/auth/google/callback".to_string()),

            mongodb_uri: env::var("MONGODB_URI").ok(),

            mongodb_db: env::var("MONGODB_DB").unwrap_or_else(|_| "mcdash".to_string()),

            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| DEV_SESSION_SECRET.to_string()),

            secure_cookies: env::var("SECURE_COOKIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),

            probe_timeout_ms: env::var("PROBE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),

            status_period_secs: env::var("STATUS_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            status_burst_limit: env::var("STATUS_BURST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            create_period_secs: env::var("CREATE_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),

            create_burst_limit: env::var("CREATE_BURST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn status_quota(&self) -> Quota {
        Quota::with_period(Duration::from_secs(self.status_period_secs))
            .unwrap()
            .allow_burst(NonZeroU32::new(self.status_burst_limit).unwrap())
    }

    pub fn create_quota(&self) -> Quota {
        Quota::with_period(Duration::from_secs(self.create_period_secs))
            .unwrap()
            .allow_burst(NonZeroU32::new(self.create_burst_limit).unwrap())
    }
}
