//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{LOG_ENV, init_subscriber};
pub use types::{AccountEntry, AccountStatus, Log};
