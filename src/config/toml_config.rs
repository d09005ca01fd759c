use crate::core::http::{RetryPolicy, DEFAULT_BASE_URL};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SteamWebApiError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    pub retry: Option<RetrySection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub production: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrySection {
    pub max_attempts: Option<u32>,
    pub max_ratelimit_wait_seconds: Option<f64>,
    pub backoff_base_ms: Option<u64>,
    pub backoff_step_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SteamWebApiError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| SteamWebApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.validate_token()?;
        self.validate_limits()
    }

    /// Rejects an empty token or one whose `${VAR}` was never set.
    pub fn validate_token(&self) -> Result<()> {
        if let Some(token) = &self.api.token {
            validate_non_empty_string("api.token", token)?;
            if ENV_PLACEHOLDER.is_match(token) {
                return Err(SteamWebApiError::InvalidConfigValueError {
                    field: "api.token".to_string(),
                    value: token.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Checks everything except the token.
    pub fn validate_limits(&self) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            validate_url("api.base_url", base_url)?;
        }

        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(retry) = &self.retry {
            if let Some(attempts) = retry.max_attempts {
                validate_range("retry.max_attempts", attempts, 1, 20)?;
            }
            if let Some(wait) = retry.max_ratelimit_wait_seconds {
                if !wait.is_finite() {
                    return Err(SteamWebApiError::InvalidConfigValueError {
                        field: "retry.max_ratelimit_wait_seconds".to_string(),
                        value: wait.to_string(),
                        reason: "Value must be a finite number".to_string(),
                    });
                }
                validate_range("retry.max_ratelimit_wait_seconds", wait, 0.0, 3600.0)?;
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl RetrySection {
    pub fn to_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            max_ratelimit_wait: self
                .max_ratelimit_wait_seconds
                .and_then(|s| Duration::try_from_secs_f64(s).ok())
                .unwrap_or(defaults.max_ratelimit_wait),
            backoff_base: self
                .backoff_base_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff_base),
            backoff_step: self
                .backoff_step_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff_step),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn token(&self) -> Option<&str> {
        self.api.token.as_deref()
    }

    fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn production(&self) -> bool {
        self.api.production.unwrap_or(false)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(30))
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetrySection::to_policy)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
