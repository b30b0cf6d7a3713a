pub mod authentication;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod rate_limit;
pub mod security;
