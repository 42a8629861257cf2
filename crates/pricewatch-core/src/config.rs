use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can use a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");
    let products_path = PathBuf::from(or_default(
        "PRICEWATCH_PRODUCTS_PATH",
        "./config/products.json",
    ));
    let data_dir = PathBuf::from(or_default("PRICEWATCH_DATA_DIR", "./data"));
    let webdriver_url = or_default("PRICEWATCH_WEBDRIVER_URL", "http://localhost:9515");
    let headless = parse_bool(&or_default("PRICEWATCH_HEADLESS", "true"))
        .ok_or_else(|| invalid("PRICEWATCH_HEADLESS", "expected true or false".to_string()))?;
    let user_agent = lookup("PRICEWATCH_USER_AGENT")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let settle_delay_ms = parse_u64("PRICEWATCH_SETTLE_DELAY_MS", "3000")?;
    let element_wait_secs = parse_u64("PRICEWATCH_ELEMENT_WAIT_SECS", "10")?;
    let search_result_limit = parse_usize("PRICEWATCH_SEARCH_RESULT_LIMIT", "10")?;
    if search_result_limit == 0 {
        return Err(invalid(
            "PRICEWATCH_SEARCH_RESULT_LIMIT",
            "must be at least 1".to_string(),
        ));
    }
    let schedule_cron = or_default("PRICEWATCH_SCHEDULE_CRON", "0 0 9 * * *");

    Ok(AppConfig {
        log_level,
        products_path,
        data_dir,
        webdriver_url,
        headless,
        user_agent,
        settle_delay_ms,
        element_wait_secs,
        search_result_limit,
        schedule_cron,
    })
}

/// Accepts the usual spellings of a boolean flag.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
