use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppInfo,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "SkyFare Japan Flight Analyzer API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

/// Amadeus Self-Service credentials. Leaving either credential empty runs the
/// service on canned data.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AmadeusConfig {
    pub client_id: String,
    pub client_secret: String,
    /// `test` or `production`; ignored when `base_url` is set.
    pub hostname: String,
    pub base_url: Option<String>,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            hostname: "test".to_string(),
            base_url: None,
        }
    }
}

impl AmadeusConfig {
    /// Client id and secret, when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return None;
        }
        Some((&self.client_id, &self.client_secret))
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ if self.hostname == "production" => "https://api.amadeus.com".to_string(),
            _ => "https://test.api.amadeus.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PoolConfig {
    pub max_concurrent: usize,
    pub timeout_seconds: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_concurrent: 8, timeout_seconds: 30 }
    }
}

impl PoolConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: vec!["*".to_string()] }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "skyfare_api=debug,skyfare_provider=debug,tower_http=debug".to_string() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SKYFARE__AMADEUS__CLIENT_ID=abc` sets `amadeus.client_id`
            .add_source(
                config::Environment::with_prefix("SKYFARE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(contents: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_select_dummy_mode() {
        let config = from_toml("");
        assert_eq!(config.server.port, 8000);
        assert!(config.amadeus.credentials().is_none());
        assert_eq!(config.amadeus.base_url(), "https://test.api.amadeus.com");
        assert_eq!(config.pool.max_concurrent, 8);
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
    }

    #[test]
    fn test_credentials_require_both_values() {
        let config = from_toml("[amadeus]\nclient_id = \"id\"\n");
        assert!(config.amadeus.credentials().is_none());

        let config = from_toml("[amadeus]\nclient_id = \"id\"\nclient_secret = \"secret\"\n");
        assert_eq!(config.amadeus.credentials(), Some(("id", "secret")));
    }

    #[test]
    fn test_base_url_follows_hostname_unless_overridden() {
        let config = from_toml("[amadeus]\nhostname = \"production\"\n");
        assert_eq!(config.amadeus.base_url(), "https://api.amadeus.com");

        let config = from_toml("[amadeus]\nhostname = \"production\"\nbase_url = \"http://localhost:9000/\"\n");
        assert_eq!(config.amadeus.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_pool_and_server_sections() {
        let config = from_toml("[server]\nport = 9090\n[pool]\nmax_concurrent = 2\ntimeout_seconds = 5\n");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.pool.max_concurrent, 2);
        assert_eq!(config.pool.timeout(), Duration::from_secs(5));
    }
}
