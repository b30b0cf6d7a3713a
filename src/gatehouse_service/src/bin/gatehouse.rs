use std::time::Duration;

use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;

use gatehouse_adapters::{
    authentication::{JwtConfig, JwtTokenIssuer},
    config::Settings,
    email::PostmarkEmailClient,
    persistence::InMemoryAccountStore,
    rate_limit::FixedWindowRateLimiter,
    security::Argon2PasswordHasher,
};
use gatehouse_core::Email;
use gatehouse_service::{GatehouseService, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let account_store = InMemoryAccountStore::new();
    let password_hasher = Argon2PasswordHasher::new(settings.auth.hasher);

    let token_issuer = JwtTokenIssuer::new(JwtConfig {
        cookie_name: settings.auth.jwt.cookie_name.clone(),
        secret: settings.auth.jwt.secret.clone(),
        token_ttl_in_seconds: settings.auth.jwt.token_ttl_in_seconds,
    });

    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_in_millis))
        .build()?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.parse::<reqwest::Url>()?,
        Email::try_from(Secret::new(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        settings.email_client.message_stream.clone(),
        http_client,
    );

    let rate_limiter = FixedWindowRateLimiter::new(
        settings.rate_limit.max_requests,
        Duration::from_secs(settings.rate_limit.window_in_seconds),
    );

    let service = GatehouseService::new(
        account_store,
        password_hasher,
        email_client,
        token_issuer,
        rate_limiter,
        settings.server.public_base_url.clone(),
        settings.auth.require_verified_email,
    );

    let listener = std::net::TcpListener::bind(&settings.server.address)?;
    service.run_standalone(listener, None).await?;

    Ok(())
}
