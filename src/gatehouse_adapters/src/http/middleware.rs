use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use gatehouse_core::RateLimiter;

use super::routes::error::ApiError;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

// Behind a proxy the client address arrives in x-forwarded-for; the first
// entry is the originating client. Without the header every caller shares
// one bucket.
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_owned())
        .unwrap_or_else(|| String::from("unknown"))
}

pub async fn enforce_rate_limit<R>(
    State(limiter): State<R>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    R: RateLimiter,
{
    limiter.check(&client_key(&request)).await?;
    Ok(next.run(request).await)
}
