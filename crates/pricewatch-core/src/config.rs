use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default listing endpoint (Hong Kong Consumer Council supermarket
/// price-watch feed).
pub const DEFAULT_FEED_URL: &str =
    "https://www.consumer.org.hk/json/pricewatch/supermarket/price-watch-listing.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let supabase_url = require("SUPABASE_URL")?;
    let supabase_key = require("SUPABASE_KEY")?;
    let r2_account_id = require("R2_ACCOUNT_ID")?;
    let r2_access_key = require("R2_ACCESS_KEY")?;
    let r2_secret_key = require("R2_SECRET_KEY")?;

    let feed_url = or_default("PRICEWATCH_FEED_URL", DEFAULT_FEED_URL);
    let feed_user_agent = or_default("PRICEWATCH_FEED_USER_AGENT", "Mozilla/5.0");
    let request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        supabase_url,
        supabase_key,
        r2_account_id,
        r2_access_key,
        r2_secret_key,
        feed_url,
        feed_user_agent,
        request_timeout_secs,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SUPABASE_URL", "https://abc123.supabase.co");
        m.insert("SUPABASE_KEY", "service-role-key");
        m.insert("R2_ACCOUNT_ID", "acct-1");
        m.insert("R2_ACCESS_KEY", "access-1");
        m.insert("R2_SECRET_KEY", "secret-1");
        m
    }

    #[test]
    fn build_app_config_fails_without_supabase_url() {
        let mut map = full_env();
        map.remove("SUPABASE_URL");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_URL"),
            "expected MissingEnvVar(SUPABASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_supabase_key() {
        let mut map = full_env();
        map.remove("SUPABASE_KEY");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_KEY"),
            "expected MissingEnvVar(SUPABASE_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_r2_credentials() {
        for var in ["R2_ACCOUNT_ID", "R2_ACCESS_KEY", "R2_SECRET_KEY"] {
            let mut map = full_env();
            map.remove(var);
            let result = build_app_config(lookup_from_map(&map));
            assert!(
                matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == var),
                "expected MissingEnvVar({var}), got: {result:?}"
            );
        }
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.supabase_url, "https://abc123.supabase.co");
        assert_eq!(cfg.feed_url, DEFAULT_FEED_URL);
        assert_eq!(cfg.feed_user_agent, "Mozilla/5.0");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_feed_url_override() {
        let mut map = full_env();
        map.insert("PRICEWATCH_FEED_URL", "https://example.com/feed.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.feed_url, "https://example.com/feed.json");
    }

    #[test]
    fn build_app_config_user_agent_override() {
        let mut map = full_env();
        map.insert("PRICEWATCH_FEED_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.feed_user_agent, "custom-agent/2.0");
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = full_env();
        map.insert("PRICEWATCH_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_timeout_invalid() {
        let mut map = full_env();
        map.insert("PRICEWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEWATCH_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PRICEWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("service-role-key"));
        assert!(!rendered.contains("secret-1"));
        assert!(!rendered.contains("access-1"));
        assert!(rendered.contains("[redacted]"));
    }
}
