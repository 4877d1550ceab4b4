//! Backend entry-point: loads settings, prepares storage, and serves the
//! clinic REST API.

mod server;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use clinic_backend::domain::{DEFAULT_STAFF, seed_staff};
use clinic_backend::inbound::http::health::HealthState;
use clinic_backend::outbound::ClinicRepositories;
use clinic_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use clinic_backend::outbound::security::{
    Argon2PasswordHasher, BuildMode, token_secret_from_env,
};
use clinic_backend::settings::ClinicSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ClinicSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let token_secret = token_secret_from_env(&env, mode).map_err(std::io::Error::other)?;

    let repositories = match settings.database_url(&env) {
        Some(url) => connect_postgres(&settings, &url).await?,
        None if mode == BuildMode::Debug => {
            warn!("no database URL configured; serving from memory (dev only)");
            ClinicRepositories::in_memory()
        }
        None => {
            return Err(std::io::Error::other(
                "set CLINIC_DATABASE_URL or DATABASE_URL to start the server",
            ));
        }
    };

    if settings.seed_staff() {
        let report = seed_staff(
            &DEFAULT_STAFF,
            repositories.users.as_ref(),
            &Argon2PasswordHasher::new(),
            &DefaultClock,
        )
        .await
        .map_err(|e| std::io::Error::other(format!("staff seeding failed: {e}")))?;
        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "staff seeding complete"
        );
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, repositories, token_secret);
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    if let Err(e) = &result {
        error!(error = %e, "server stopped with an error");
    } else {
        info!("server stopped");
    }
    result
}

async fn connect_postgres(
    settings: &ClinicSettings,
    database_url: &str,
) -> std::io::Result<ClinicRepositories> {
    if settings.run_migrations() {
        run_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
    }
    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config).await.map_err(|e| {
        error!(error = %e, "database pool build failed");
        std::io::Error::other(format!("database pool build failed: {e}"))
    })?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(ClinicRepositories::postgres(&pool))
}

