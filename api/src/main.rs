use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use um_api::app::configure_app;
use um_api::middleware::SecurityMiddleware;
use um_api::routes::verification::AppState;
use um_api::telemetry::init_tracing;
use um_core::services::{AuditService, AuditServiceConfig, EmailVerificationService};
use um_infra::{DatabasePool, HttpIdentityServiceClient, MySqlAuditEventRepository, MySqlUserRepository};
use um_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // APP_CONFIG_FILE selects a TOML file layered with APP__* variables;
    // otherwise plain environment variables (and .env) are used.
    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        Err(_) => {
            let config = AppConfig::from_env();
            config.validate()?;
            config
        }
    };

    init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        context_path = %config.server.normalized_context_path(),
        "Starting user management service"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let audit_repository = Arc::new(MySqlAuditEventRepository::new(pool));

    let identity_service = Arc::new(
        HttpIdentityServiceClient::new(config.identity.clone())
            .context("failed to build identity service client")?,
    );

    let audit_service = Arc::new(AuditService::new(
        audit_repository,
        AuditServiceConfig::from(&config.audit),
    ));

    let verification_service = Arc::new(EmailVerificationService::new(
        user_repository,
        Arc::clone(&identity_service),
        audit_service,
    ));

    let app_state = web::Data::new(AppState::new(verification_service, identity_service));
    let database_data = web::Data::new(database.clone());
    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();

    tracing::info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(SecurityMiddleware::from_config(&server_config))
            .wrap(TracingLogger::default())
            .app_data(database_data.clone())
            .configure(|cfg| configure_app(cfg, app_state.clone(), &server_config))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    database.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
