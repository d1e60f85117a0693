use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

/// Base URL used when nothing else is configured outside production.
pub const DEVELOPMENT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Path the API is mounted under in production, relative to `APM_API_ORIGIN`.
pub const PRODUCTION_API_PATH: &str = "/api";

/// Distinguishes runtime behavior for different stages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api = ApiConfig::resolve(
            environment,
            env::var("APM_API_BASE_URL").ok(),
            env::var("APM_API_ORIGIN").ok(),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            api,
        })
    }
}

/// Settings controlling the console backend binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the remote credit application API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// An explicit base URL wins; otherwise development and test talk to the local
    /// backend and production mounts `/api` on the configured origin.
    pub fn resolve(
        environment: AppEnvironment,
        explicit: Option<String>,
        origin: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = explicit.filter(|value| !value.trim().is_empty()) {
            return Self::with_base_url(&raw);
        }

        match environment {
            AppEnvironment::Development | AppEnvironment::Test => {
                Self::with_base_url(DEVELOPMENT_API_BASE_URL)
            }
            AppEnvironment::Production => {
                let origin = origin
                    .filter(|value| !value.trim().is_empty())
                    .ok_or(ConfigError::MissingApiOrigin)?;
                let joined = Url::parse(origin.trim())
                    .and_then(|url| url.join(PRODUCTION_API_PATH))
                    .map_err(|source| ConfigError::InvalidApiUrl {
                        value: origin.clone(),
                        source,
                    })?;
                Self::with_base_url(joined.as_str())
            }
        }
    }

    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        Url::parse(trimmed).map_err(|source| ConfigError::InvalidApiUrl {
            value: trimmed.to_string(),
            source,
        })?;

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    MissingApiOrigin,
    InvalidApiUrl {
        value: String,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingApiOrigin => write!(
                f,
                "APM_API_ORIGIN or APM_API_BASE_URL must be set in production"
            ),
            ConfigError::InvalidApiUrl { value, .. } => {
                write!(f, "'{value}' is not an absolute API url")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::MissingApiOrigin => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidApiUrl { source, .. } => Some(source),
        }
    }
}
