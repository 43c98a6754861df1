//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreBackend,
    /// Present whenever `store` is `Postgres`
    pub database: Option<DatabaseConfig>,
    /// Live event publication is skipped when unset
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub ledger: LedgerConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
    /// Force JSON log lines outside production
    #[serde(default)]
    pub json_logs: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Which transactional store backs the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORE_BACKEND", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply bundled migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration (validation only; tokens are issued elsewhere)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Retry policy for the ledger's atomic unit
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LedgerConfig {
    /// Total attempts, including the first one
    #[serde(default = "default_ledger_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts; doubled each retry, plus jitter
    #[serde(default = "default_ledger_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_ledger_max_attempts(),
            retry_backoff_ms: default_ledger_backoff_ms(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "lonkind".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_ledger_max_attempts() -> u32 {
    5
}

fn default_ledger_backoff_ms() -> u64 {
    10
}

/// Parse an optional variable, falling back to `default` when unset or malformed
fn parse_or<T: FromStr>(value: Option<String>, default: impl FnOnce() -> T) -> T {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or_else(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from a fixed set of variables
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = var("APP_ENV")
            .as_deref()
            .and_then(Environment::parse)
            .unwrap_or_default();

        let store = match var("STORE_BACKEND") {
            Some(s) => s.parse()?,
            None => StoreBackend::default(),
        };

        let database = match (store, var("DATABASE_URL")) {
            (_, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(var("DATABASE_MAX_CONNECTIONS"), default_max_connections),
                min_connections: parse_or(var("DATABASE_MIN_CONNECTIONS"), default_min_connections),
                run_migrations: parse_or(var("DATABASE_RUN_MIGRATIONS"), || false),
            }),
            (StoreBackend::Postgres, None) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (StoreBackend::Memory, None) => None,
        };

        let ledger = LedgerConfig {
            max_attempts: parse_or(var("LEDGER_MAX_ATTEMPTS"), default_ledger_max_attempts),
            retry_backoff_ms: parse_or(var("LEDGER_RETRY_BACKOFF_MS"), default_ledger_backoff_ms),
        };
        if ledger.max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "LEDGER_MAX_ATTEMPTS",
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
                json_logs: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: var("API_PORT")
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
                request_timeout_secs: parse_or(var("API_REQUEST_TIMEOUT_SECS"), default_request_timeout),
            },
            store,
            database,
            redis: var("REDIS_URL").map(|url| RedisConfig {
                url,
                max_connections: parse_or(var("REDIS_MAX_CONNECTIONS"), default_redis_max_connections),
            }),
            jwt: JwtConfig {
                secret: var("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_or(var("JWT_ACCESS_TOKEN_EXPIRY"), default_access_token_expiry),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    var("RATE_LIMIT_REQUESTS_PER_SECOND"),
                    default_requests_per_second,
                ),
                burst: parse_or(var("RATE_LIMIT_BURST"), default_burst),
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_or(var("WORKER_ID"), || 0),
            },
            ledger,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
