use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::ResetPasswordUseCase;
use gatehouse_core::{AccountStore, Password, PasswordHasher, RecoveryToken};

use super::MessageResponse;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<S, H>(
    State((account_store, password_hasher)): State<(S, H)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let token = RecoveryToken::parse(&request.token)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = ResetPasswordUseCase::new(account_store, password_hasher);
    use_case.execute(token, new_password).await?;

    Ok(Json(MessageResponse {
        message: String::from("Password has been reset successfully"),
    }))
}
