//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `CLINIC_*` environment variables over an
//! optional configuration file.

use std::net::{AddrParseError, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address used when `bind_addr` is not configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
/// Conventional variable consulted when `database_url` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Pool size used when `db_max_connections` is unset.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Migrations run unless explicitly disabled.
pub const DEFAULT_RUN_MIGRATIONS: bool = true;
/// Staff seeding is opt-in.
pub const DEFAULT_SEED_STAFF: bool = false;

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLINIC")]
pub struct ClinicSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
    /// Create the default doctor and receptionist accounts on startup.
    pub seed_staff: Option<bool>,
}

impl ClinicSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self, env: &impl Env) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether pending migrations are applied at startup (on by default).
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS)
    }

    /// Whether the default staff accounts are created at startup.
    pub fn seed_staff(&self) -> bool {
        self.seed_staff.unwrap_or(DEFAULT_SEED_STAFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    fn load_from_empty_args() -> ClinicSettings {
        ClinicSettings::load_from_iter([OsString::from("clinic-backend")])
            .expect("config should load")
    }

    fn env_with_database_url(url: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .withf(|key| key == DATABASE_URL_ENV)
            .returning(move |_| url.map(str::to_owned));
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("CLINIC_BIND_ADDR", None::<String>),
            ("CLINIC_DATABASE_URL", None::<String>),
            ("CLINIC_DB_MAX_CONNECTIONS", None::<String>),
            ("CLINIC_RUN_MIGRATIONS", None::<String>),
            ("CLINIC_SEED_STAFF", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid")
        );
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(settings.run_migrations());
        assert!(!settings.seed_staff());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CLINIC_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            ("CLINIC_DATABASE_URL", Some("postgres://clinic@db/clinic".to_owned())),
            ("CLINIC_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("CLINIC_RUN_MIGRATIONS", Some("false".to_owned())),
            ("CLINIC_SEED_STAFF", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:8080".parse::<SocketAddr>().expect("valid")
        );
        assert_eq!(
            settings.database_url(&MockEnv::new()).as_deref(),
            Some("postgres://clinic@db/clinic")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations());
        assert!(settings.seed_staff());
    }

    #[rstest]
    #[case(Some("postgres://fallback/clinic"), Some("postgres://fallback/clinic"))]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn database_url_falls_back_to_the_conventional_variable(
        #[case] fallback: Option<&'static str>,
        #[case] expected: Option<&str>,
    ) {
        let settings = ClinicSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
            run_migrations: None,
            seed_staff: None,
        };
        let env = env_with_database_url(fallback);
        assert_eq!(settings.database_url(&env).as_deref(), expected);
    }

    #[rstest]
    #[case(None, None, true, false)]
    #[case(Some(false), Some(true), false, true)]
    #[case(Some(true), Some(false), true, false)]
    fn startup_switches_fall_back_to_their_defaults(
        #[case] run_migrations: Option<bool>,
        #[case] seed_staff: Option<bool>,
        #[case] expect_migrations: bool,
        #[case] expect_seeding: bool,
    ) {
        let settings = ClinicSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
            run_migrations,
            seed_staff,
        };
        assert_eq!(settings.run_migrations(), expect_migrations);
        assert_eq!(settings.seed_staff(), expect_seeding);
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = ClinicSettings {
            bind_addr: Some("not-an-address".into()),
            database_url: None,
            db_max_connections: None,
            run_migrations: None,
            seed_staff: None,
        };
        assert!(settings.bind_addr().is_err());
    }
}
