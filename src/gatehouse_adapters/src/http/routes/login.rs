use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use gatehouse_application::LoginUseCase;
use gatehouse_core::{AccountStore, Email, Password, PasswordHasher, SanitizedAccount};

use crate::authentication::{JwtTokenIssuer, create_session_cookie};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct LoginHttpResponse {
    pub account: SanitizedAccount,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, H>(
    State((account_store, password_hasher, token_issuer, require_verified_email)): State<(
        S,
        H,
        JwtTokenIssuer,
        bool,
    )>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(
        account_store,
        password_hasher,
        token_issuer.clone(),
        require_verified_email,
    );
    let response = use_case.execute(email, password).await?;

    let cookie = create_session_cookie(response.session_token, token_issuer.cookie_name());
    let updated_jar = jar.add(cookie);

    Ok((
        updated_jar,
        Json(LoginHttpResponse {
            account: response.account,
        }),
    ))
}
