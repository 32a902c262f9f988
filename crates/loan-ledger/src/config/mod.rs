use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = "loans.dat";

/// Distinguishes runtime behavior for different stages of the ledger.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LOANS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("LOANS_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        let store = StoreConfig::new(path)?;

        let log_level = env::var("LOANS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            store,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the fixed-slot loan record file.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }
        Ok(Self { path })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyStorePath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyStorePath => write!(f, "LOANS_STORE_PATH must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
