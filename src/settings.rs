use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    /// Name of the cookie carrying the opaque session token.
    pub session_cookie: String,
    /// Hold window: how long a seat stays reserved before payment confirmation.
    pub hold_minutes: i64,
    /// Payment window stamped on every registration at reservation time.
    pub payment_hours: i64,
    /// How often the expiry sweeper reclaims lapsed holds.
    pub sweep_interval_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix. No separator:
            // the whole suffix maps onto the flat lowercased field name, so
            // APP_HOLD_MINUTES lands on `hold_minutes`.
            .add_source(Environment::with_prefix("APP"))
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("session_cookie", "session")?
            .set_default("hold_minutes", 10)?
            .set_default("payment_hours", 24)?
            .set_default("sweep_interval_secs", 60)?
            .build()?;

        config.try_deserialize()
    }
}
