pub mod settings;

pub use settings::{
    AuthSettings, EmailClientSettings, JwtSettings, RateLimitSettings, ServerSettings, Settings,
};
