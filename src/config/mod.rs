use std::path::Path;

use anyhow::{Context, Result};

use tracing::{debug, info};

pub mod model;

pub use model::*;

impl Config {
    /// Load configuration from a specific file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        debug!("Configuration loaded and validated successfully");

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self> {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "dockdash", "dockdash") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        // Try current directory
        let local_config = std::path::PathBuf::from("config.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.general.default_log_tail == 0 {
            anyhow::bail!("default_log_tail must be at least 1");
        }

        if self.general.stop_timeout_secs < 0 {
            anyhow::bail!("stop_timeout_secs must not be negative");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_log_tail, 100);
        assert!(config.docker.host.is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let invalid_config = Config {
            general: GeneralConfig {
                default_log_tail: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            "[docker]\nhost = \"tcp://127.0.0.1:2375\"\n\n[general]\ndefault_log_tail = 50\n",
        )
        .unwrap();

        let loaded = Config::load(temp_file.path()).unwrap();
        assert_eq!(loaded.docker.host.as_deref(), Some("tcp://127.0.0.1:2375"));
        assert_eq!(loaded.general.default_log_tail, 50);
        // Sections left out of the file fall back to defaults
        assert!(loaded.ui.mouse_enabled);
    }
}
