pub mod client;
pub mod http;

pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
