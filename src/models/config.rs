use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Runtime settings of the photo platform server.
///
/// Loaded from `config/default.yaml`, an optional `config/<APP_ENV>.yaml`
/// and `APP__*` environment variables, in that order of precedence.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    /// Cookie signing key; must be at least 64 bytes.
    pub secret_key: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
