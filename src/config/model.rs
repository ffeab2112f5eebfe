use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{ConnectionSettings, DEFAULT_DOCKER_HOST};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log lines fetched by the one-shot logs viewer
    #[serde(default = "default_log_tail")]
    pub default_log_tail: u64,
    /// Grace period passed to container stop
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout_secs: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_log_tail: default_log_tail(),
            stop_timeout_secs: default_stop_timeout(),
        }
    }
}

/// UI customization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub mouse_enabled: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
        }
    }
}

/// Docker connection settings, seeding the Settings tab
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DockerConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ca_path: Option<PathBuf>,
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    #[serde(default)]
    pub key_path: Option<PathBuf>,
}

impl DockerConfig {
    /// Build the initial in-memory connection settings
    pub fn connection_settings(&self) -> ConnectionSettings {
        let path_string = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        ConnectionSettings {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCKER_HOST.to_string()),
            ca_path: path_string(&self.ca_path),
            cert_path: path_string(&self.cert_path),
            key_path: path_string(&self.key_path),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

// Default value functions
fn default_log_tail() -> u64 {
    100
}

fn default_stop_timeout() -> i64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let general = GeneralConfig::default();
        assert_eq!(general.default_log_tail, 100);
        assert_eq!(general.stop_timeout_secs, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(!toml_str.is_empty());
    }

    #[test]
    fn test_connection_settings_fall_back_to_local_socket() {
        let docker = DockerConfig::default();
        let settings = docker.connection_settings();
        assert_eq!(settings.host, DEFAULT_DOCKER_HOST);
        assert!(settings.tls_material().is_none());
    }

    #[test]
    fn test_connection_settings_carry_tls_paths() {
        let docker = DockerConfig {
            host: Some("tcp://10.0.0.5:2376".to_string()),
            ca_path: Some(PathBuf::from("/certs/ca.pem")),
            cert_path: Some(PathBuf::from("/certs/cert.pem")),
            key_path: Some(PathBuf::from("/certs/key.pem")),
        };
        let settings = docker.connection_settings();
        assert_eq!(settings.host, "tcp://10.0.0.5:2376");
        assert!(settings.tls_material().is_some());
    }
}
