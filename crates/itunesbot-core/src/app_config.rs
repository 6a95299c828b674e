/// Runtime settings for a crawl, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// Storefront host whose `/<region>/app/` links are treated as detail pages.
    pub store_host: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    /// Additional attempts after the first failure for transient fetch errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `retry_backoff_base_secs * 2^attempt`.
    pub retry_backoff_base_secs: u64,
}
