/// Service configuration loader - parses ripmon.toml
///
/// Separates tunables from code, making it easy to adjust the cache TTL,
/// search radius, or upstream timeouts without recompiling the service.
/// Every field has a default, so the service runs with no config file at
/// all; a few operationally hot values can also be overridden through the
/// environment (loaded via dotenv in main).

use serde::Deserialize;
use std::fs;

/// Tunables for the risk service and its HTTP endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// How long a cached assessment stays fresh (default: 10 minutes).
    pub cache_ttl_minutes: u64,

    /// Station search radius around the query point (default: 50 miles).
    pub search_radius_miles: f64,

    /// How many of the nearest stations to fetch data from (default: 3).
    pub station_fanout: usize,

    /// Per-request timeout for upstream calls (default: 30 seconds).
    pub request_timeout_secs: u64,

    /// User-Agent sent on every upstream request. The NWS API rejects
    /// requests without one.
    pub user_agent: String,

    /// Port for the HTTP endpoint.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl_minutes: 10,
            search_radius_miles: 50.0,
            station_fanout: 3,
            request_timeout_secs: 30,
            user_agent: "(ripmon_service, ops@ripmon.example)".to_string(),
            port: 8080,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from `ripmon.toml` in the working directory if
    /// present, then applies environment overrides. Missing file → defaults;
    /// a malformed file is an error rather than a silent fallback.
    pub fn load() -> Result<Self, String> {
        let mut config = match fs::read_to_string("ripmon.toml") {
            Ok(contents) => parse_toml(&contents)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(
            std::env::var("RIPMON_CACHE_TTL_MIN").ok(),
            std::env::var("RIPMON_USER_AGENT").ok(),
            std::env::var("RIPMON_PORT").ok(),
        );
        Ok(config)
    }

    /// Applies environment-style overrides. Unparseable values are ignored
    /// in favor of the configured ones, logged at warn.
    pub fn apply_overrides(
        &mut self,
        ttl_minutes: Option<String>,
        user_agent: Option<String>,
        port: Option<String>,
    ) {
        if let Some(raw) = ttl_minutes {
            match raw.parse::<u64>() {
                Ok(minutes) => self.cache_ttl_minutes = minutes,
                Err(_) => tracing::warn!(value = %raw, "ignoring unparseable RIPMON_CACHE_TTL_MIN"),
            }
        }
        if let Some(agent) = user_agent {
            if !agent.trim().is_empty() {
                self.user_agent = agent;
            }
        }
        if let Some(raw) = port {
            match raw.parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => tracing::warn!(value = %raw, "ignoring unparseable RIPMON_PORT"),
            }
        }
    }
}

fn parse_toml(contents: &str) -> Result<ServiceConfig, String> {
    toml::from_str(contents).map_err(|e| format!("Failed to parse ripmon.toml: {}", e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_operational_contract() {
        let config = ServiceConfig::default();
        assert_eq!(config.cache_ttl_minutes, 10, "TTL default is 10 minutes");
        assert_eq!(config.search_radius_miles, 50.0);
        assert_eq!(config.station_fanout, 3);
        assert_eq!(config.request_timeout_secs, 30, "30s timeout bounds worst-case latency");
        assert_eq!(config.port, 8080);
        assert!(!config.user_agent.is_empty(), "NWS requires a User-Agent");
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_fields() {
        let config = parse_toml("cache_ttl_minutes = 5\nport = 9090\n")
            .expect("partial config should parse");
        assert_eq!(config.cache_ttl_minutes, 5);
        assert_eq!(config.port, 9090);
        // Unspecified fields fall back to defaults
        assert_eq!(config.search_radius_miles, 50.0);
        assert_eq!(config.station_fanout, 3);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = parse_toml("cache_ttl_minutes = \"not a number\"");
        assert!(result.is_err(), "type mismatch should be reported, not defaulted");
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(
            Some("30".to_string()),
            Some("(beachapp, beach@example.org)".to_string()),
            Some("8123".to_string()),
        );
        assert_eq!(config.cache_ttl_minutes, 30);
        assert_eq!(config.user_agent, "(beachapp, beach@example.org)");
        assert_eq!(config.port, 8123);
    }

    #[test]
    fn test_unparseable_overrides_are_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(Some("soon".to_string()), Some("  ".to_string()), Some("-1".to_string()));
        assert_eq!(config.cache_ttl_minutes, 10, "bad TTL override keeps default");
        assert_eq!(
            config.user_agent,
            ServiceConfig::default().user_agent,
            "blank user agent keeps default"
        );
        assert_eq!(config.port, 8080, "bad port override keeps default");
    }
}
