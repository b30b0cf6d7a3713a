use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use gatehouse_application::VerifyResetCodeUseCase;
use gatehouse_core::{AccountStore, Email, RecoveryCode};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: Secret<String>,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyResetCodeResponse {
    pub message: &'static str,
    pub token: String,
}

#[tracing::instrument(name = "Verify reset code", skip_all)]
pub async fn verify_reset_code<S>(
    State(account_store): State<S>,
    Json(request): Json<VerifyResetCodeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let code = RecoveryCode::parse(&request.code)?;

    let use_case = VerifyResetCodeUseCase::new(account_store);
    let token = use_case.execute(email, code).await?;

    Ok(Json(VerifyResetCodeResponse {
        message: "Code verified",
        token: token.as_ref().expose_secret().clone(),
    }))
}
