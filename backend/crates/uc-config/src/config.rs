use crate::{
    AuthConfig, AuthMode, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, SanitizerConfig, ServerConfig,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub sanitizer: SanitizerConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for UC_CONFIG_DIR env var, else use ./.uc/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply UC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: UC_CONFIG_DIR env var > ./.uc/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        self.sanitizer.validate()?;

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_timeout(&self) -> Duration {
        Duration::from_millis(self.server.max_timeout_ms)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };
        let config_dir = Self::config_dir()?;
        Ok(Some(config_dir.join(&self.logging.dir).join(file)))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max timeout {}ms)",
            self.server.host, self.server.port, self.server.max_timeout_ms
        );

        match self.auth.mode() {
            Ok(AuthMode::Oidc {
                issuer_url,
                client_id,
            }) => info!(
                "  auth: oidc issuer={} audience={} refresh={}s",
                issuer_url,
                client_id.unwrap_or("<unchecked>"),
                self.auth.jwks_refresh_secs
            ),
            Ok(AuthMode::StaticSecret { .. }) => info!("  auth: static HS256 secret"),
            Err(_) => info!("  auth: not configured"),
        }

        info!("  auth exempt routes: {:?}", self.auth.exempt_routes);

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("<stdout>")
        );

        info!(
            "  sanitizer: {} additional sensitive fields",
            self.sanitizer.sensitive_fields.len()
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("UC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("UC_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse("UC_SERVER_MAX_TIMEOUT_MS", &mut self.server.max_timeout_ms);

        // Auth
        Self::apply_env_option_string("UC_AUTH_ISSUER_URL", &mut self.auth.issuer_url);
        Self::apply_env_option_string("UC_AUTH_CLIENT_ID", &mut self.auth.client_id);
        Self::apply_env_parse(
            "UC_AUTH_JWKS_REFRESH_SECS",
            &mut self.auth.jwks_refresh_secs,
        );
        Self::apply_env_parse(
            "UC_AUTH_HTTP_TIMEOUT_SECS",
            &mut self.auth.http_timeout_secs,
        );
        Self::apply_env_option_string("UC_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_list("UC_AUTH_EXEMPT_ROUTES", &mut self.auth.exempt_routes);

        // Logging
        Self::apply_env_parse("UC_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("UC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("UC_LOG_FILE", &mut self.logging.file);

        // Sanitizer
        Self::apply_env_list(
            "UC_SANITIZER_FIELDS",
            &mut self.sanitizer.sensitive_fields,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Comma-separated; blank entries are dropped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
