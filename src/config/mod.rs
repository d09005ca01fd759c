pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::core::http::RetryPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::time::Duration;

/// Connection settings after merging command-line flags over a config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub token: Option<String>,
    pub base_url: String,
    pub production: bool,
    pub timeout_seconds: u64,
    pub retry: RetryPolicy,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl ConfigProvider for ApiSettings {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn production(&self) -> bool {
        self.production
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        if let Some(token) = &self.token {
            validate_non_empty_string("token", token)?;
        }
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_range("retry.max_attempts", self.retry.max_attempts, 1, 20)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
pub mod cli {
    use super::{ApiSettings, TomlConfig};
    use crate::core::http::DEFAULT_BASE_URL;
    use crate::core::ConfigProvider;
    use crate::utils::error::{Result, SteamWebApiError};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "steamwebapi", version)]
    #[command(about = "Command-line access to the steamwebapi.com API")]
    pub struct CliConfig {
        /// API key. Falls back to the config file.
        #[arg(long, env = "STEAMWEBAPI_TOKEN", hide_env_values = true, global = true)]
        pub token: Option<String>,

        #[arg(long, global = true, help = "TOML config file")]
        pub config: Option<PathBuf>,

        /// Send production=1 with every request. `--production=false` overrides the file.
        #[arg(
            long,
            global = true,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            value_name = "BOOL"
        )]
        pub production: Option<bool>,

        #[arg(long, global = true)]
        pub base_url: Option<String>,

        #[arg(long, global = true)]
        pub timeout_seconds: Option<u64>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// GET an API path and print the response.
        Get {
            /// Path starting with '/'.
            path: String,

            /// Query parameter, repeatable.
            #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
            params: Vec<(String, String)>,

            /// Write the response body here instead of stdout.
            #[arg(short, long)]
            output: Option<PathBuf>,
        },
        /// Convert Steam IDs between formats. Works offline.
        Steamid {
            #[arg(required = true)]
            values: Vec<String>,
        },
    }

    impl Command {
        pub fn needs_token(&self) -> bool {
            matches!(self, Command::Get { .. })
        }
    }

    pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
        match raw.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
        }
    }

    impl CliConfig {
        /// Loads the config file, if any, and lays the command-line flags over it.
        pub fn settings(&self) -> Result<ApiSettings> {
            let file = match &self.config {
                Some(path) => {
                    let file = TomlConfig::from_file(path)?;
                    file.validate_limits()?;
                    if self.token.is_none() {
                        file.validate_token()?;
                    }
                    file
                }
                None => TomlConfig::default(),
            };

            let settings = ApiSettings {
                token: self
                    .token
                    .clone()
                    .or_else(|| file.token().map(str::to_owned)),
                base_url: self
                    .base_url
                    .clone()
                    .or_else(|| file.api.base_url.clone())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                production: self.production.unwrap_or_else(|| file.production()),
                timeout_seconds: self
                    .timeout_seconds
                    .or(file.api.timeout_seconds)
                    .unwrap_or(30),
                retry: file.retry_policy(),
                log_level: file.log_level().map(str::to_owned),
                json_logs: self.json_logs || file.json_logs(),
            };

            if self.command.needs_token() && settings.token.is_none() {
                return Err(SteamWebApiError::MissingConfigError {
                    field: "token (--token, STEAMWEBAPI_TOKEN or [api].token)".to_string(),
                });
            }

            Ok(settings)
        }
    }

}
