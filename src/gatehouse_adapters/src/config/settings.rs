use secrecy::Secret;
use serde::Deserialize;

use crate::security::HasherParams;

/// Service configuration, layered lowest to highest priority: built-in
/// defaults, an optional `gatehouse.json` next to the binary, then
/// `GATEHOUSE__`-prefixed environment variables (`__` separates nesting,
/// e.g. `GATEHOUSE__AUTH__JWT__SECRET`). A `.env` file is read first so
/// local runs can keep overrides out of the shell profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    /// Origin used when building verification links mailed to users.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub require_verified_email: bool,
    pub hasher: HasherParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub message_stream: String,
    pub timeout_in_millis: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_in_seconds: u64,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        Self::defaults()?
            .add_source(config::File::with_name("gatehouse").required(false))
            .add_source(config::Environment::with_prefix("GATEHOUSE").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn defaults()
    -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.address", "0.0.0.0:3000")?
            .set_default("server.public_base_url", "http://localhost:3000")?
            .set_default("auth.jwt.cookie_name", "gatehouse_session")?
            // Placeholder for local runs; override in any real deployment.
            .set_default("auth.jwt.secret", "insecure-dev-secret")?
            .set_default("auth.jwt.token_ttl_in_seconds", 600)?
            .set_default("auth.require_verified_email", true)?
            .set_default("auth.hasher.m_cost", 15000)?
            .set_default("auth.hasher.t_cost", 2)?
            .set_default("auth.hasher.p_cost", 1)?
            .set_default("email_client.base_url", "https://api.postmarkapp.com/")?
            .set_default("email_client.sender", "no-reply@gatehouse.local")?
            .set_default("email_client.auth_token", "")?
            .set_default("email_client.message_stream", "outbound")?
            .set_default("email_client.timeout_in_millis", 10_000)?
            .set_default("rate_limit.max_requests", 100)?
            .set_default("rate_limit.window_in_seconds", 15 * 60)
    }
}
