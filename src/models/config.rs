use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options for the catalog server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path of the SQLite database holding the key-value medium.
    pub database_url: String,
    /// Directory containing the Tera templates.
    pub templates_dir: String,
    /// Secret used to sign flash message cookies.
    pub secret: String,
}

impl ServerConfig {
    /// Load `config/default.yaml`, then `config/{APP_ENV}.yaml` if present,
    /// then `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
