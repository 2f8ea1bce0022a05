use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated. Any origin when unset.
    pub cors_origins: Option<String>,

    /// Log level, used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name reported by the health endpoints
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Maximum accepted HTTP request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Messages queued per connection before the relay sheds load
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        envy::from_env::<Config>().map_err(ConfigError::EnvError)
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed list of allowed CORS origins. `None` means any origin.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() {
            None
        } else {
            Some(origins)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            log_level: default_log_level(),
            service_name: default_service_name(),
            max_body_bytes: default_max_body_bytes(),
            outbox_capacity: default_outbox_capacity(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9084
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "collaboration-service".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_outbox_capacity() -> usize {
    crate::ws::hub::DEFAULT_OUTBOX_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_collaboration_service() {
        let config = Config::default();
        assert_eq!(config.server_address(), "0.0.0.0:9084");
        assert_eq!(config.service_name, "collaboration-service");
        assert_eq!(config.max_body_bytes, 50 * 1024 * 1024);
        assert_eq!(config.outbox_capacity, 256);
        assert!(config.allowed_origins().is_none());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = Config {
            cors_origins: Some("http://localhost:3000, https://app.example.com ,".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.allowed_origins(),
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string(),
            ])
        );
    }

    #[test]
    fn blank_cors_origins_mean_any() {
        let config = Config {
            cors_origins: Some(" , ".to_string()),
            ..Config::default()
        };
        assert!(config.allowed_origins().is_none());
    }

    #[test]
    fn envy_reads_prefixless_variables() {
        let vars = vec![
            ("PORT".to_string(), "4100".to_string()),
            ("SERVICE_NAME".to_string(), "relay-test".to_string()),
            ("OUTBOX_CAPACITY".to_string(), "16".to_string()),
        ];
        let config: Config = envy::from_iter(vars).expect("config should parse");
        assert_eq!(config.port, 4100);
        assert_eq!(config.service_name, "relay-test");
        assert_eq!(config.outbox_capacity, 16);
        assert_eq!(config.host, "0.0.0.0");
    }
}
