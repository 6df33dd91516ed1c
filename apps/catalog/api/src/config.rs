use core_config::{app_info, logging::LoggingConfig, server::ServerConfig, AppInfo, FromEnv};

// Import database config from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, core_config::ConfigError> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL is not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let logging = LoggingConfig::from_env()?; // Defaults to "information"

        Ok(Self {
            app: app_info!(),
            database,
            logging,
            server,
            environment,
        })
    }
}
