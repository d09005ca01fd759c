//! Async client for the [steamwebapi.com](https://www.steamwebapi.com) API.
//!
//! The [`Client`] takes care of authentication parameters, decoding responses
//! by content type, turning error statuses into [`SteamWebApiError`] variants,
//! waiting out rate limits and retrying server errors. Response payloads
//! deserialise into the types in [`models`].

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// Crate version, also sent in the default `User-Agent`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{ApiSettings, TomlConfig};
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use core::client::{Client, ClientBuilder};
pub use core::http::{RequestOptions, ResponseBody, RetryPolicy, Route};
pub use domain::enums::{
    Game, InventoryState, ItemHistoryOrigin, ItemHistorySource, ItemHistoryType, Language,
    ScreenshotColorScheme, ScreenshotFormat, ScreenshotLogoOffset, SortOrder, Wear,
};
pub use domain::models;
pub use domain::ports::ConfigProvider;
pub use domain::steamid::SteamId;
pub use utils::error::{ApiErrorDetails, ErrorSeverity, Result, SteamWebApiError};
