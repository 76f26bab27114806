//! Configuration for Items API

use core_config::{app_info, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `None` when `DATABASE_URL` is unset; items are then kept in memory
    pub database: Option<PostgresConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let database = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(PostgresConfig::from_env()?),
            _ => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            database,
        })
    }
}
