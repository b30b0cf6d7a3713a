use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde_json::json;

use gatehouse_adapters::{
    authentication::{JwtConfig, JwtTokenIssuer},
    email::MockEmailClient,
    persistence::InMemoryAccountStore,
    rate_limit::FixedWindowRateLimiter,
    security::{Argon2PasswordHasher, HasherParams},
};
use gatehouse_core::{AccountStore, Email};
use gatehouse_service::GatehouseService;

struct TestApp {
    address: String,
    client: reqwest::Client,
    account_store: InMemoryAccountStore,
}

impl TestApp {
    async fn spawn() -> Self {
        Self::spawn_with_limiter(FixedWindowRateLimiter::new(100, Duration::from_secs(900))).await
    }

    async fn spawn_with_limiter(rate_limiter: FixedWindowRateLimiter) -> Self {
        let account_store = InMemoryAccountStore::new();
        let password_hasher = Argon2PasswordHasher::new(HasherParams {
            m_cost: 1024,
            t_cost: 1,
            p_cost: 1,
        });
        let token_issuer = JwtTokenIssuer::new(JwtConfig {
            cookie_name: "session".to_string(),
            secret: Secret::from("test-secret".to_owned()),
            token_ttl_in_seconds: 600,
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = GatehouseService::new(
            account_store.clone(),
            password_hasher,
            MockEmailClient::new(),
            token_issuer,
            rate_limiter,
            address.clone(),
            true,
        );
        tokio::spawn(service.run_standalone(listener, None));

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        Self {
            address,
            client,
            account_store,
        }
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/auth/register", self.address))
            .json(&json!({ "email": email, "password": password, "name": name }))
            .send()
            .await
            .unwrap()
    }

    async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/auth/login", self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap()
    }

    async fn forgot_password(&self, email: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/auth/forgot-password", self.address))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap()
    }

    async fn stored_account(&self, email: &str) -> gatehouse_core::Account {
        let email = Email::try_from(Secret::from(email.to_owned())).unwrap();
        self.account_store.find_by_email(&email).await.unwrap()
    }

    /// Pull the verification secret out of the store, standing in for
    /// reading the mailed link.
    async fn verification_code(&self, email: &str) -> String {
        self.stored_account(email)
            .await
            .verification_secret()
            .unwrap()
            .as_ref()
            .expose_secret()
            .clone()
    }

    async fn recovery_code(&self, email: &str) -> String {
        self.stored_account(email)
            .await
            .recovery_code()
            .unwrap()
            .as_ref()
            .expose_secret()
            .clone()
    }

    async fn verify_email(&self, code: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/auth/verify-email?code={}", self.address, code))
            .send()
            .await
            .unwrap()
    }

    /// Register and verify in one step for tests that start from an
    /// activated account.
    async fn register_verified(&self, email: &str, password: &str) {
        assert_eq!(self.register(email, password, "Lifecycle Tester").await.status(), 201);
        let code = self.verification_code(email).await;
        assert_eq!(self.verify_email(&code).await.status(), 200);
    }
}

#[tokio::test]
async fn registration_and_verification_gate_the_first_login() {
    let app = TestApp::spawn().await;

    let response = app.register("ada@example.com", "pw123456", "Ada").await;
    assert_eq!(response.status(), 201);

    // Unverified accounts cannot log in, and the rejection is the same
    // shape as a bad password.
    let response = app.login("ada@example.com", "pw123456").await;
    assert_eq!(response.status(), 401);

    let code = app.verification_code("ada@example.com").await;
    let response = app.verify_email(&code).await;
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("Email verified"));

    let response = app.login("ada@example.com", "pw123456").await;
    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("session=")
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["account"]["email"], "ada@example.com");
    assert_eq!(body["account"]["verified"], true);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register("ada@example.com", "pw123456", "Ada").await.status(), 201);
    assert_eq!(app.register("ada@example.com", "other-pw", "Imposter").await.status(), 409);
}

#[tokio::test]
async fn verification_link_is_single_use() {
    let app = TestApp::spawn().await;
    assert_eq!(app.register("ada@example.com", "pw123456", "Ada").await.status(), 201);

    let code = app.verification_code("ada@example.com").await;
    assert!(app.verify_email(&code).await.text().await.unwrap().contains("Email verified"));

    let replay = app.verify_email(&code).await;
    assert_eq!(replay.status(), 200);
    assert!(replay.text().await.unwrap().contains("Verification failed"));
}

#[tokio::test]
async fn unknown_and_wrong_password_logins_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_verified("ada@example.com", "pw123456").await;

    let wrong_password = app.login("ada@example.com", "not-the-password").await;
    let unknown_account = app.login("nobody@example.com", "whatever-pw").await;

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_account.status(), 401);
    assert_eq!(
        wrong_password.text().await.unwrap(),
        unknown_account.text().await.unwrap()
    );
}

#[tokio::test]
async fn forgot_password_does_not_reveal_whether_an_account_exists() {
    let app = TestApp::spawn().await;
    app.register_verified("ada@example.com", "pw123456").await;

    let known = app.forgot_password("ada@example.com").await;
    let unknown = app.forgot_password("nobody@example.com").await;

    assert_eq!(known.status(), 200);
    assert_eq!(unknown.status(), 200);
    assert_eq!(known.text().await.unwrap(), unknown.text().await.unwrap());
}

#[tokio::test]
async fn recovery_flow_resets_the_password_end_to_end() {
    let app = TestApp::spawn().await;
    app.register_verified("ada@example.com", "pw123456").await;

    assert_eq!(app.forgot_password("ada@example.com").await.status(), 200);
    let code = app.recovery_code("ada@example.com").await;

    let response = app
        .client
        .post(format!("{}/auth/verify-reset-code", app.address))
        .json(&json!({ "email": "ada@example.com", "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_owned();

    // The code was consumed by the exchange.
    let replayed_code = app
        .client
        .post(format!("{}/auth/verify-reset-code", app.address))
        .json(&json!({ "email": "ada@example.com", "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(replayed_code.status(), 400);

    let response = app
        .client
        .post(format!("{}/auth/reset-password", app.address))
        .json(&json!({ "token": token, "newPassword": "fresh-pw-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 401);
    assert_eq!(app.login("ada@example.com", "fresh-pw-1").await.status(), 200);

    // The token was consumed by the reset.
    let replayed_token = app
        .client
        .post(format!("{}/auth/reset-password", app.address))
        .json(&json!({ "token": token, "newPassword": "sneaky-pw-2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(replayed_token.status(), 400);
}

#[tokio::test]
async fn change_password_requires_a_session_and_the_current_password() {
    let app = TestApp::spawn().await;
    app.register_verified("ada@example.com", "pw123456").await;

    // No session cookie yet.
    let response = app
        .client
        .post(format!("{}/auth/change-password", app.address))
        .json(&json!({ "currentPassword": "pw123456", "newPassword": "fresh-pw-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 200);

    let response = app
        .client
        .post(format!("{}/auth/change-password", app.address))
        .json(&json!({ "currentPassword": "not-the-password", "newPassword": "fresh-pw-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 200);

    let response = app
        .client
        .post(format!("{}/auth/change-password", app.address))
        .json(&json!({ "currentPassword": "pw123456", "newPassword": "fresh-pw-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 401);
    assert_eq!(app.login("ada@example.com", "fresh-pw-1").await.status(), 200);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = TestApp::spawn().await;
    app.register_verified("ada@example.com", "pw123456").await;
    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 200);

    let response = app
        .client
        .post(format!("{}/auth/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The removal cookie wiped the client's session; an authenticated
    // route no longer sees one.
    let response = app
        .client
        .post(format!("{}/auth/change-password", app.address))
        .json(&json!({ "currentPassword": "pw123456", "newPassword": "fresh-pw-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn login_is_rate_limited_per_client() {
    let app =
        TestApp::spawn_with_limiter(FixedWindowRateLimiter::new(2, Duration::from_secs(900)))
            .await;
    app.register_verified("ada@example.com", "pw123456").await;

    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 200);
    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 200);
    assert_eq!(app.login("ada@example.com", "pw123456").await.status(), 429);

    // Registration is not throttled.
    assert_eq!(app.register("bob@example.com", "pw123456", "Bob").await.status(), 201);
}
