use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Field names redacted from logged payloads on top of the built-in set
    /// (`password`, `token`, `secret`, `apikey`, `auth`), which always applies
    pub sensitive_fields: Vec<String>,
}

impl SanitizerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.sensitive_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::sanitizer(
                "sanitizer.sensitive_fields cannot contain blank names",
            ));
        }

        Ok(())
    }
}
