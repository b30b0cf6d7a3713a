use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::ForgotPasswordUseCase;
use gatehouse_core::{AccountStore, Email, EmailClient};

use super::MessageResponse;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

/// The response body is identical whether or not the address is registered.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<S, E>(
    State((account_store, email_client)): State<(S, E)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = ForgotPasswordUseCase::new(account_store, email_client);
    let message = use_case.execute(email).await?;

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
