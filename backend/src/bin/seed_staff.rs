#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]
//! Create the default doctor and receptionist accounts.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin seed-staff -- --database-url postgres://localhost/clinic
//! ```

use std::env;

use clap::Parser;
use clinic_backend::domain::{DEFAULT_STAFF, seed_staff};
use clinic_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations,
};
use clinic_backend::outbound::security::Argon2PasswordHasher;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// `seed-staff` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-staff",
    about = "Create the default clinic staff accounts when their usernames are free",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Skip applying pending migrations first.
    #[arg(long = "skip-migrations")]
    skip_migrations: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("pass --database-url or set DATABASE_URL"))?;

    if !args.skip_migrations {
        run_migrations(&database_url)
            .await
            .context("apply database migrations")?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(1))
        .await
        .context("connect to the database")?;
    let users = DieselUserRepository::new(pool);

    let report = seed_staff(
        &DEFAULT_STAFF,
        &users,
        &Argon2PasswordHasher::new(),
        &DefaultClock,
    )
    .await
    .map_err(|err| eyre!("seeding failed: {err}"))?;

    for username in &report.created {
        println!("created {username}");
    }
    for username in &report.skipped {
        println!("skipped {username} (already exists)");
    }
    Ok(())
}
