use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::RegisterUseCase;
use gatehouse_core::{AccountStore, DisplayName, Email, EmailClient, Password, PasswordHasher};

use super::MessageResponse;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub name: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H, E>(
    State((account_store, password_hasher, email_client, public_base_url)): State<(
        S,
        H,
        E,
        String,
    )>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let display_name = DisplayName::try_from(request.name)?;

    let use_case = RegisterUseCase::new(
        account_store,
        password_hasher,
        email_client,
        public_base_url,
    );
    use_case.execute(email, password, display_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: String::from(
                "Account created. Please check your email to verify your address.",
            ),
        }),
    ))
}
