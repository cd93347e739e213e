//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `QNA_*` environment variables and an optional
//! configuration file, in OrthoConfig's usual precedence. Unset values fall
//! back to the defaults exposed by the accessors below.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::FieldErrors;
use crate::domain::validation::check_one_of;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "questions";
const DEFAULT_DB_SSLMODE: &str = "disable";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Deployment environments accepted by `env`.
pub const ENVIRONMENTS: &[&str] = &["local", "dev", "prod"];

/// Deployment environment selecting the logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Human-readable logs at debug level.
    #[default]
    Local,
    /// JSON logs at debug level.
    Dev,
    /// JSON logs at info level.
    Prod,
}

impl Environment {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// OrthoConfig could not merge the configuration layers.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// One or more values failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(FieldErrors),
    /// The listen address is not a socket address.
    #[error("invalid listen address {address:?}: {message}")]
    Address { address: String, message: String },
}

/// Service settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QNA")]
pub struct AppSettings {
    /// Deployment environment: `local`, `dev` or `prod`.
    pub env: Option<String>,
    /// Listen address, `host:port`.
    pub address: Option<String>,
    /// Read and write timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Keep-alive idle timeout in seconds.
    pub idle_timeout_secs: Option<u64>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub db_sslmode: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Skip applying embedded migrations before serving.
    pub skip_migrations: Option<bool>,
}

impl AppSettings {
    /// Load settings from the process arguments, environment and files.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a layer cannot be parsed.
    pub fn load_from_args<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Configured deployment environment name.
    pub fn env_name(&self) -> &str {
        self.env.as_deref().unwrap_or("local")
    }

    /// Parsed deployment environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] keyed `Env` for unknown names.
    pub fn environment(&self) -> Result<Environment, SettingsError> {
        let name = self.env_name();
        check_one_of(name, ENVIRONMENTS)
            .map_err(|violation| SettingsError::Invalid(FieldErrors::single("Env", violation)))?;
        Ok(match name {
            "dev" => Environment::Dev,
            "prod" => Environment::Prod,
            _ => Environment::Local,
        })
    }

    /// Listen address string.
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or(DEFAULT_ADDRESS)
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Address`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.address()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::Address {
                address: self.address().to_owned(),
                message: err.to_string(),
            })
    }

    /// Read and write timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Keep-alive idle timeout.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs.unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS))
    }

    /// Maximum pooled database connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether to apply embedded migrations at startup.
    ///
    /// An absent CLI flag merges as `Some(false)`, so only `Some(true)` skips.
    pub fn run_migrations(&self) -> bool {
        self.skip_migrations != Some(true)
    }

    /// PostgreSQL key/value connection string.
    ///
    /// # Examples
    /// ```
    /// use backend::config::AppSettings;
    ///
    /// let settings = AppSettings::default();
    /// assert_eq!(
    ///     settings.dsn(),
    ///     "host=localhost user=postgres port=5432 password=postgres dbname=questions sslmode=disable"
    /// );
    /// ```
    pub fn dsn(&self) -> String {
        format!(
            "host={} user={} port={} password={} dbname={} sslmode={}",
            self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST),
            self.db_user.as_deref().unwrap_or(DEFAULT_DB_USER),
            self.db_port.unwrap_or(DEFAULT_DB_PORT),
            self.db_password.as_deref().unwrap_or(DEFAULT_DB_PASSWORD),
            self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME),
            self.db_sslmode.as_deref().unwrap_or(DEFAULT_DB_SSLMODE),
        )
    }

    /// Validate every value that has a constrained domain.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`SettingsError`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.environment()?;
        self.bind_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and validation.

    use super::*;
    use crate::domain::Violation;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "QNA_ENV",
        "QNA_ADDRESS",
        "QNA_TIMEOUT_SECS",
        "QNA_IDLE_TIMEOUT_SECS",
        "QNA_DB_HOST",
        "QNA_DB_PORT",
        "QNA_DB_USER",
        "QNA_DB_PASSWORD",
        "QNA_DB_NAME",
        "QNA_DB_SSLMODE",
        "QNA_DB_MAX_CONNECTIONS",
        "QNA_SKIP_MIGRATIONS",
    ];

    fn cleared_env() -> [(&'static str, Option<String>); 12] {
        VARS.map(|name| (name, None))
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_args([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(settings.environment().expect("valid env"), Environment::Local);
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.idle_timeout(), Duration::from_secs(60));
        assert_eq!(settings.db_max_connections(), 10);
        assert!(settings.run_migrations());
        assert_eq!(
            settings.dsn(),
            "host=localhost user=postgres port=5432 password=postgres dbname=questions sslmode=disable"
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut env = cleared_env();
        for (name, value) in &mut env {
            *value = match *name {
                "QNA_ENV" => Some("prod".to_owned()),
                "QNA_ADDRESS" => Some("127.0.0.1:9000".to_owned()),
                "QNA_DB_HOST" => Some("db.internal".to_owned()),
                "QNA_DB_PORT" => Some("6543".to_owned()),
                "QNA_DB_MAX_CONNECTIONS" => Some("25".to_owned()),
                _ => None,
            };
        }
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(settings.environment().expect("valid env"), Environment::Prod);
        assert_eq!(settings.address(), "127.0.0.1:9000");
        assert_eq!(settings.db_max_connections(), 25);
        assert!(settings.run_migrations());
        assert!(settings.dsn().starts_with("host=db.internal user=postgres port=6543"));
    }

    #[rstest]
    fn migrations_can_be_skipped_from_the_command_line() {
        let _guard = lock_env(cleared_env());

        let settings = AppSettings::load_from_args([
            OsString::from("backend"),
            OsString::from("--skip-migrations"),
        ])
        .expect("config should load");

        assert!(!settings.run_migrations());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(false), true)]
    #[case(Some(true), false)]
    fn migrations_run_unless_skipped(#[case] skip: Option<bool>, #[case] expected: bool) {
        let settings = AppSettings {
            skip_migrations: skip,
            ..AppSettings::default()
        };
        assert_eq!(settings.run_migrations(), expected);
    }

    #[rstest]
    #[case("staging")]
    #[case("PROD")]
    fn unknown_environment_is_rejected(#[case] env: &str) {
        let settings = AppSettings {
            env: Some(env.to_owned()),
            ..AppSettings::default()
        };

        match settings.validate() {
            Err(SettingsError::Invalid(errors)) => assert_eq!(
                errors.get("Env"),
                Some(&Violation::OneOf(vec![
                    "local".to_owned(),
                    "dev".to_owned(),
                    "prod".to_owned(),
                ]))
            ),
            other => panic!("expected invalid env, got {other:?}"),
        }
    }

    #[rstest]
    fn empty_environment_is_required() {
        let settings = AppSettings {
            env: Some(String::new()),
            ..AppSettings::default()
        };
        let err = settings.environment().expect_err("empty env");
        assert!(matches!(err, SettingsError::Invalid(errors) if errors.get("Env") == Some(&Violation::Required)));
    }

    #[rstest]
    fn malformed_address_is_rejected() {
        let settings = AppSettings {
            address: Some("localhost".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Address { .. })
        ));
    }
}
