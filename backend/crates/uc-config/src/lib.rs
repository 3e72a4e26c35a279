mod auth_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod sanitizer_config;
mod server_config;

pub use auth_config::{AuthConfig, AuthMode};
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use sanitizer_config::SanitizerConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "UC_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".uc";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_JWKS_REFRESH_SECS: u64 = 300;
const MIN_JWKS_REFRESH_SECS: u64 = 10;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
