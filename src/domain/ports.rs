use crate::core::http::RetryPolicy;
use std::time::Duration;

/// Anything that can supply the settings a [`crate::Client`] is built from.
pub trait ConfigProvider: Send + Sync {
    fn token(&self) -> Option<&str>;
    fn base_url(&self) -> &str;
    fn production(&self) -> bool;
    fn timeout(&self) -> Duration;

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}
