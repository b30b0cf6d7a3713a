use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use gatehouse_adapters::{
    authentication::JwtTokenIssuer,
    http::{
        middleware::enforce_rate_limit,
        routes::{
            change_password, forgot_password, login, logout, register, reset_password,
            verify_email, verify_reset_code,
        },
    },
};
use gatehouse_core::{AccountStore, EmailClient, PasswordHasher, RateLimiter};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// Credential lifecycle service mounted under `/auth`.
pub struct GatehouseService {
    router: Router,
}

impl GatehouseService {
    /// Wire the routes to the provided adapters. Each route receives only
    /// the state it needs; login and forgot-password additionally sit
    /// behind the rate limiter.
    pub fn new<S, H, E, R>(
        account_store: S,
        password_hasher: H,
        email_client: E,
        token_issuer: JwtTokenIssuer,
        rate_limiter: R,
        public_base_url: String,
        require_verified_email: bool,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
        R: RateLimiter + Clone + 'static,
    {
        let throttled = Router::new()
            .route("/login", post(login::<S, H>))
            .with_state((
                account_store.clone(),
                password_hasher.clone(),
                token_issuer.clone(),
                require_verified_email,
            ))
            .route("/forgot-password", post(forgot_password::<S, E>))
            .with_state((account_store.clone(), email_client.clone()))
            .route_layer(from_fn_with_state(rate_limiter, enforce_rate_limit::<R>));

        let routes = Router::new()
            .route("/register", post(register::<S, H, E>))
            .with_state((
                account_store.clone(),
                password_hasher.clone(),
                email_client,
                public_base_url,
            ))
            .route("/verify-email", get(verify_email::<S>))
            .with_state(account_store.clone())
            .route("/verify-reset-code", post(verify_reset_code::<S>))
            .with_state(account_store.clone())
            .route("/reset-password", post(reset_password::<S, H>))
            .with_state((account_store.clone(), password_hasher.clone()))
            .route("/change-password", post(change_password::<S, H>))
            .with_state((account_store, password_hasher, token_issuer.clone()))
            .route("/logout", post(logout))
            .with_state(token_issuer)
            .merge(throttled);

        let router = Router::new().nest("/auth", routes);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting cross-origin callers.
    pub fn into_router(mut self, allowed_origins: Option<Vec<HeaderValue>>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::list(allowed_origins));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run as a standalone server on an already-bound listener.
    pub async fn run_standalone(
        self,
        listener: std::net::TcpListener,
        allowed_origins: Option<Vec<HeaderValue>>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        listener.set_nonblocking(true)?;
        tracing::info!("Gatehouse listening on {}", listener.local_addr()?);

        axum_server::from_tcp(listener)?
            .serve(router.into_make_service())
            .await
    }
}
