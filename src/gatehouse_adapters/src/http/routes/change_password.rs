use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::ChangePasswordUseCase;
use gatehouse_core::{AccountId, AccountStore, Password, PasswordHasher, TokenIssuer};

use crate::authentication::{JwtTokenIssuer, extract_session_token};

use super::MessageResponse;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: Secret<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<S, H>(
    State((account_store, password_hasher, token_issuer)): State<(S, H, JwtTokenIssuer)>,
    jar: CookieJar,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let token = extract_session_token(&jar, token_issuer.cookie_name())?;
    let claims = token_issuer.verify(token)?;
    let account_id = AccountId::parse(&claims.sid).map_err(|_| ApiError::InvalidSession)?;

    let current_password = Password::try_from(request.current_password)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = ChangePasswordUseCase::new(account_store, password_hasher);
    use_case
        .execute(account_id, current_password, new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: String::from("Password changed successfully"),
    }))
}
