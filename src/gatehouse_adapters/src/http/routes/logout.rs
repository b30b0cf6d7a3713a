use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::authentication::{JwtTokenIssuer, create_removal_cookie};

use super::MessageResponse;

/// Stateless logout: the removal cookie tells the browser to drop the
/// session. The token itself stays valid until its natural expiry.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(token_issuer): State<JwtTokenIssuer>, jar: CookieJar) -> impl IntoResponse {
    let updated_jar = jar.add(create_removal_cookie(token_issuer.cookie_name()));

    (
        updated_jar,
        Json(MessageResponse {
            message: String::from("Logged out"),
        }),
    )
}
