//! # Gatehouse - Credential Lifecycle Service Library
//!
//! This is a facade crate that re-exports all public APIs from the gatehouse components.
//! Use this crate to get access to the full credential lifecycle in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, etc.
//! - **Port traits**: `AccountStore`, `EmailClient`, `PasswordHasher`, `TokenIssuer`, `RateLimiter`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ForgotPasswordUseCase`, etc.
//! - **Adapters**: `InMemoryAccountStore`, `Argon2PasswordHasher`, `JwtTokenIssuer`, `PostmarkEmailClient`, etc.
//! - **Service**: `GatehouseService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    Account, AccountError, AccountId, DisplayName, Email, Password, PasswordHash, RecoveryCode,
    RecoveryError, RecoveryToken, Role, SanitizedAccount, VerificationSecret,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gatehouse_core::{
        AccountStore, AccountStoreError, EmailClient, PasswordHasher, PasswordHasherError,
        RateLimitError, RateLimiter, SessionClaims, TokenIssuer, TokenIssuerError,
    };
}

// Re-export port traits at root level
pub use gatehouse_core::{
    AccountStore, AccountStoreError, EmailClient, PasswordHasher, PasswordHasherError,
    RateLimitError, RateLimiter, SessionClaims, TokenIssuer, TokenIssuerError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

// Re-export use cases at root level
pub use gatehouse_application::{
    ChangePasswordUseCase, ForgotPasswordUseCase, LoginUseCase, RegisterUseCase,
    ResetPasswordUseCase, VerifyEmailUseCase, VerifyResetCodeUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers and middleware
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// Session token utilities
    pub mod authentication {
        pub use gatehouse_adapters::authentication::*;
    }

    /// Password hashing
    pub mod security {
        pub use gatehouse_adapters::security::*;
    }

    /// Request throttling
    pub mod rate_limit {
        pub use gatehouse_adapters::rate_limit::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{
    authentication::{JwtConfig, JwtTokenIssuer},
    config::Settings,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::InMemoryAccountStore,
    rate_limit::FixedWindowRateLimiter,
    security::Argon2PasswordHasher,
};

// ============================================================================
// Gatehouse Service (Main Entry Point)
// ============================================================================

/// Main HTTP service
pub use gatehouse_service::{GatehouseService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
