use thiserror::Error;

use crate::app_config::AppConfig;

/// Errors raised while assembling [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every variable has a default; only malformed numeric values fail.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files — useful when the caller manages
/// env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the parsing/validation core, decoupled from the real environment
/// so tests can drive it with a plain `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = or_default("FARMALABEL_API_BASE_URL", "http://localhost:3000");
    let api_token = lookup("FARMALABEL_API_TOKEN").ok();
    let request_timeout_secs = parse_u64("FARMALABEL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FARMALABEL_USER_AGENT", "farmalabel/0.1 (label-printing)");
    let log_level = or_default("FARMALABEL_LOG_LEVEL", "info");
    let export_scale = parse_u32("FARMALABEL_EXPORT_SCALE", "2")?;

    Ok(AppConfig {
        api_base_url,
        api_token,
        request_timeout_secs,
        user_agent,
        log_level,
        export_scale,
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

    #[test]
    fn empty_env_yields_full_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let config = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert!(config.api_token.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.export_scale, 2);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FARMALABEL_API_BASE_URL", "https://pos.example.cl");
        map.insert("FARMALABEL_API_TOKEN", "MI_TOKEN_DEMO_123");
        map.insert("FARMALABEL_EXPORT_SCALE", "3");
        let config = build_app_config(lookup_from_map(&map)).expect("config should parse");
        assert_eq!(config.api_base_url, "https://pos.example.cl");
        assert_eq!(config.api_token.as_deref(), Some("MI_TOKEN_DEMO_123"));
        assert_eq!(config.export_scale, 3);
    }

    #[test]
    fn malformed_timeout_is_an_error() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FARMALABEL_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FARMALABEL_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_the_token() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FARMALABEL_API_TOKEN", "MI_TOKEN_DEMO_123");
        let config = build_app_config(lookup_from_map(&map)).expect("config should parse");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("MI_TOKEN_DEMO_123"));
        assert!(rendered.contains("[redacted]"));
    }
}
