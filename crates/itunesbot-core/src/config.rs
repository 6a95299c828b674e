use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables already in the process.
///
/// Does NOT load `.env` files; the binary calls `dotenvy::dotenv()` before
/// argument parsing.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("ITUNESBOT_LOG_LEVEL", "info");
    let store_host = or_default("ITUNESBOT_STORE_HOST", "itunes.apple.com");
    if store_host.is_empty() || store_host.contains('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: "ITUNESBOT_STORE_HOST".to_string(),
            reason: format!("expected a bare host name, got \"{store_host}\""),
        });
    }

    let request_timeout_secs = parse_u64("ITUNESBOT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ITUNESBOT_USER_AGENT", "itunesbot/0.1 (app-metadata)");
    let inter_request_delay_ms = parse_u64("ITUNESBOT_INTER_REQUEST_DELAY_MS", "250")?;
    let max_retries = parse_u32("ITUNESBOT_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("ITUNESBOT_RETRY_BACKOFF_BASE_SECS", "5")?;

    Ok(AppConfig {
        log_level,
        store_host,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
