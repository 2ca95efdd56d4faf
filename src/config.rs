use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret used to verify bearer tokens
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// JSON file with initial users and matches; the store starts empty without it
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., ROOMIE__SERVER__PORT -> server.port
    Environment::with_prefix("ROOMIE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROOMIE__)
    /// 5. `JWT_SECRET`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        apply_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known unprefixed environment variables on top of the loaded config
fn apply_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(secret) = std::env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    builder.build()
}
