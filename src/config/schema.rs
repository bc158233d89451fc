//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Tracking snippet injection settings.
    pub tracking: TrackingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Tracking snippet injection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Enable snippet injection. Disabled unless explicitly turned on.
    pub enabled: bool,

    /// Named insertion position ("top" or "bottom").
    pub insertion: String,

    /// Ready-to-embed markup spliced into eligible HTML responses.
    pub snippet: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            insertion: "bottom".to_string(),
            snippet: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert!(!config.tracking.enabled);
        assert_eq!(config.tracking.insertion, "bottom");
        assert_eq!(config.tracking.snippet, "");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [tracking]
            enabled = true
            snippet = "<script>X</script>"
            "#,
        )
        .unwrap();
        assert!(config.tracking.enabled);
        assert_eq!(config.tracking.snippet, "<script>X</script>");
        assert_eq!(config.tracking.insertion, "bottom");
    }
}
