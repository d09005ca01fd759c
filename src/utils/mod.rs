pub mod batch;
pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use batch::as_chunks;
pub use time::{parse_date, parse_iso_utc_timestamp, parse_timestamp, to_iso_format, utcnow};
