use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{SanitizedAccount, SessionClaims, TokenIssuer, TokenIssuerError};

#[derive(Clone)]
pub struct JwtConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// HS256-signed session tokens carried in an HttpOnly cookie. Logout is a
/// client-side cookie removal; issued tokens stay valid until expiry.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, account: &SanitizedAccount) -> Result<String, TokenIssuerError> {
        let delta =
            chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or_else(|| {
                TokenIssuerError::SigningFailed("Failed to create token duration".to_string())
            })?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or_else(|| TokenIssuerError::SigningFailed("Duration out of range".to_string()))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            TokenIssuerError::SigningFailed("Failed to cast i64 to usize".to_string())
        })?;

        let claims = SessionClaims {
            sub: account.email.as_ref().expose_secret().clone(),
            sid: account.id.to_string(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )
        .map_err(|e| TokenIssuerError::SigningFailed(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenIssuerError::InvalidToken)
    }
}

pub fn extract_session_token<'a>(
    jar: &'a CookieJar,
    cookie_name: &str,
) -> Result<&'a str, TokenIssuerError> {
    match jar.get(cookie_name) {
        Some(cookie) => Ok(cookie.value()),
        None => Err(TokenIssuerError::InvalidToken),
    }
}

// Create cookie and set the value to the passed-in token string
pub fn create_session_cookie(token: String, cookie_name: &str) -> Cookie<'static> {
    Cookie::build((cookie_name.to_owned(), token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
        .build()
}

pub fn create_removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = create_session_cookie(String::new(), cookie_name);
    cookie.make_removal();
    cookie
}
