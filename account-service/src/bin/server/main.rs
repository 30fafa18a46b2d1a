use std::sync::Arc;

use account_service::config::Config;
use account_service::config::DEFAULT_JWT_SECRET;
use account_service::domain::account::service::AccountService;
use account_service::domain::mail::service::MailService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::mail::SmtpMailer;
use account_service::outbound::repositories;
use account_service::outbound::repositories::SqliteUserRepository;
use auth::Authenticator;
use auth::PasswordHasher;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        smtp_configured = config.smtp.is_configured(),
        "Configuration loaded"
    );

    if config.jwt.secret == DEFAULT_JWT_SECRET {
        tracing::warn!("JWT secret is the built-in default; set JWT__SECRET before deploying");
    }

    let pool = repositories::connect(&config.database.url).await?;
    tracing::info!(database = "sqlite", "Database ready, migrations completed");

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes(), config.jwt.expiration_seconds)
            .with_password_hasher(PasswordHasher::with_iterations(config.password.iterations)),
    );
    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));

    let account_service = Arc::new(AccountService::new(user_repository, authenticator));
    let mail_service = Arc::new(MailService::new(mailer));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, mail_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
