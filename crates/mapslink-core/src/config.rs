use std::path::PathBuf;

use crate::app_config::{AppConfig, ResolverConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
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
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to
/// [`ResolverConfig::default`] and the default paths.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ResolverConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let input_path = PathBuf::from(or_default("MAPSLINK_INPUT_PATH", "input/links.txt"));
    let output_dir = PathBuf::from(or_default("MAPSLINK_OUTPUT_DIR", "output"));
    let log_level = or_default("MAPSLINK_LOG_LEVEL", "info");

    let allowed_hosts = match lookup("MAPSLINK_ALLOWED_HOSTS") {
        Ok(raw) => parse_host_list("MAPSLINK_ALLOWED_HOSTS", &raw)?,
        Err(_) => defaults.allowed_hosts.clone(),
    };

    let resolver = ResolverConfig {
        allowed_hosts,
        browser_user_agent: or_default("MAPSLINK_BROWSER_USER_AGENT", &defaults.browser_user_agent),
        browser_accept_language: defaults.browser_accept_language.clone(),
        contact_user_agent: or_default("MAPSLINK_CONTACT_USER_AGENT", &defaults.contact_user_agent),
        nominatim_url: or_default("MAPSLINK_NOMINATIM_URL", &defaults.nominatim_url),
        overpass_url: or_default("MAPSLINK_OVERPASS_URL", &defaults.overpass_url),
        geocode_language: or_default("MAPSLINK_ACCEPT_LANGUAGE", &defaults.geocode_language),
        geocode_zoom: defaults.geocode_zoom,
        redirect_timeout_secs: parse_u64(
            "MAPSLINK_REDIRECT_TIMEOUT_SECS",
            defaults.redirect_timeout_secs,
        )?,
        geocode_timeout_secs: parse_u64(
            "MAPSLINK_GEOCODE_TIMEOUT_SECS",
            defaults.geocode_timeout_secs,
        )?,
        poi_timeout_secs: parse_u64("MAPSLINK_POI_TIMEOUT_SECS", defaults.poi_timeout_secs)?,
        poi_radius_m: parse_u32("MAPSLINK_POI_RADIUS_M", defaults.poi_radius_m)?,
        lookup_delay_ms: parse_u64("MAPSLINK_LOOKUP_DELAY_MS", defaults.lookup_delay_ms)?,
        link_delay_ms: parse_u64("MAPSLINK_LINK_DELAY_MS", defaults.link_delay_ms)?,
    };

    Ok(AppConfig {
        input_path,
        output_dir,
        log_level,
        resolver,
    })
}

/// Split a comma-separated host list, lowercasing and dropping blanks.
fn parse_host_list(var: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let hosts: Vec<String> = raw
        .split(',')
        .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect();

    if hosts.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "host list is empty".to_string(),
        });
    }
    Ok(hosts)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
