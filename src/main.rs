//! Bookstore API server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bookstore_core::config::AppConfig;
use bookstore_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("BOOKSTORE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting bookstore API v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = bookstore_database::connection::create_pool(&config.database).await?;
    bookstore_database::migration::run_migrations(&db_pool).await?;
    bookstore_database::connection::health_check(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(bookstore_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let role_repo = Arc::new(bookstore_database::repositories::RoleRepository::new(
        db_pool.clone(),
    ));
    let refresh_repo = Arc::new(
        bookstore_database::repositories::RefreshTokenRepository::new(db_pool.clone()),
    );
    let audit_repo = Arc::new(bookstore_database::repositories::AuditLogRepository::new(
        db_pool.clone(),
    ));
    let book_repo = Arc::new(bookstore_database::repositories::BookRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Auth components ──────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let password_hasher = Arc::new(bookstore_auth::password::PasswordHasher::new(&config.auth));
    let jwt_encoder = Arc::new(bookstore_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(bookstore_auth::jwt::JwtDecoder::new(&config.auth));
    let blacklist = Arc::new(bookstore_auth::revocation::TokenBlacklist::new());
    let audit = Arc::new(bookstore_auth::audit::AuditRecorder::new(audit_repo.clone()));
    let permissions = Arc::new(bookstore_auth::rbac::PermissionEvaluator::new(
        role_repo.clone(),
    ));
    let auth_service = Arc::new(bookstore_auth::session::AuthService::new(
        user_repo.clone(),
        role_repo.clone(),
        refresh_repo.clone(),
        Arc::clone(&blacklist),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&audit),
    ));

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = bookstore_api::state::AppState {
        config: Arc::new(config.clone()),
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        blacklist,
        permissions,
        auth_service,
        audit,
        identities: user_repo,
        roles: role_repo,
        refresh_tokens: refresh_repo,
        books: book_repo,
    };

    let app = bookstore_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Bookstore API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Bookstore API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
