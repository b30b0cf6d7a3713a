mod jwt_token_issuer;

pub use jwt_token_issuer::{
    JwtConfig, JwtTokenIssuer, create_removal_cookie, create_session_cookie, extract_session_token,
};
