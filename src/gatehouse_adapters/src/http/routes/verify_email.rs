use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use gatehouse_application::{VerifyEmailError, VerifyEmailUseCase};
use gatehouse_core::{AccountStore, VerificationSecret};

const SUCCESS_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Email verified</title></head>\
<body><h1>Email verified</h1>\
<p>Your address has been confirmed. You can now log in.</p></body></html>";

const FAILURE_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Verification failed</title></head>\
<body><h1>Verification failed</h1>\
<p>This verification link is invalid or has already been used.</p></body></html>";

#[derive(Deserialize)]
pub struct VerifyEmailQuery {
    pub code: String,
}

/// Browser-facing endpoint: the link lands here from the user's inbox, so
/// both outcomes render a small HTML page with status 200 instead of a
/// JSON error.
#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<S>(
    State(account_store): State<S>,
    Query(query): Query<VerifyEmailQuery>,
) -> Html<&'static str>
where
    S: AccountStore + Clone + 'static,
{
    let secret = match VerificationSecret::parse(&query.code) {
        Ok(secret) => secret,
        Err(_) => return Html(FAILURE_PAGE),
    };

    let use_case = VerifyEmailUseCase::new(account_store);
    match use_case.execute(secret).await {
        Ok(()) => Html(SUCCESS_PAGE),
        Err(VerifyEmailError::InvalidSecret) => Html(FAILURE_PAGE),
        Err(VerifyEmailError::AccountStoreError(error)) => {
            tracing::error!(%error, "verification lookup failed");
            Html(FAILURE_PAGE)
        }
    }
}
