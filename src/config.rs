use anyhow::{anyhow, Context, Result};
use sqlx::postgres::PgConnectOptions;

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_port: u16,
    pub jwt_secret: String,
    pub postgres: PostgresConfig,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub db_name: String,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Reads every required variable from the process environment.
    ///
    /// Fails on the first variable that is absent, blank or malformed.
    pub fn init() -> Result<Config> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("missing required env {key}"))
        };
        let port = |key: &str| -> Result<u16> {
            required(key)?
                .parse::<u16>()
                .with_context(|| format!("invalid port for {key}"))
        };

        Ok(Config {
            app_port: port("APP_PORT")?,
            jwt_secret: required("JWT_SECRET")?,
            postgres: PostgresConfig {
                host: required("POSTGRES_HOST")?,
                port: port("POSTGRES_PORT")?,
                db_name: required("POSTGRES_DBNAME")?,
                username: required("POSTGRES_USERNAME")?,
                password: required("POSTGRES_PASSWORD")?,
            },
        })
    }

    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres.host)
            .port(self.postgres.port)
            .username(&self.postgres.username)
            .password(&self.postgres.password)
            .database(&self.postgres.db_name)
    }
}
