use std::sync::Arc;

use account_service::config::SmtpConfig;
use account_service::domain::account::service::AccountService;
use account_service::domain::mail::service::MailService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::mail::SmtpMailer;
use account_service::outbound::repositories;
use account_service::outbound::repositories::SqliteUserRepository;
use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const TEST_SECRET: &[u8] = b"test-secret";
pub const TEST_TTL_SECONDS: i64 = 3600;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    // Holds the database file for the lifetime of the test
    _db_dir: TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite:{}", db_dir.path().join("test.db").display());
        let pool = repositories::connect(&database_url)
            .await
            .expect("Failed to open test database");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, TEST_TTL_SECONDS)
                .with_password_hasher(PasswordHasher::with_iterations(1_000)),
        );
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let account_service = Arc::new(AccountService::new(user_repo, authenticator));

        // No SMTP host: sends fail with NotConfigured before touching the network
        let mailer = Arc::new(SmtpMailer::new(SmtpConfig {
            port: 587,
            use_tls: true,
            from_name: "Jmail".to_string(),
            ..SmtpConfig::default()
        }));
        let mail_service = Arc::new(MailService::new(mailer));

        let router = create_router(account_service, mail_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            pool,
            api_client: reqwest::Client::new(),
            _db_dir: db_dir,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/register")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and return its token
    pub async fn register_token(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .register(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Sign a token for `subject` issued at `issued_at` under `secret`
    pub fn forge_token(&self, subject: i64, issued_at: i64, secret: &[u8]) -> String {
        auth::token::issue(subject, issued_at, TEST_TTL_SECONDS, secret)
            .expect("Failed to sign token")
    }

    /// Sign a currently valid token under the server's secret
    pub fn token_for(&self, subject: i64) -> String {
        self.forge_token(subject, Utc::now().timestamp(), TEST_SECRET)
    }
}
