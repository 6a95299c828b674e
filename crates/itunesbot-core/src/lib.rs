pub mod app_config;
pub mod config;
pub mod country;
pub mod options;
pub mod record;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::load_app_config_from_env;
pub use country::country_name;
pub use options::{CrawlOptions, DEFAULT_START_URL, LETTER_BUCKETS};
pub use record::{AppRecord, CrawlStatus, NOT_FOUND};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown letter bucket \"{0}\" (expected A-Z or *)")]
    InvalidLetter(String),

    #[error("letter range {start}..{end} is empty")]
    EmptyLetterRange { start: char, end: char },
}
