use thiserror::Error;

/// Main error type for Dockdash
#[derive(Error, Debug)]
pub enum DockdashError {
    /// Docker API errors
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    /// UI errors
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Docker-specific errors
#[derive(Error, Debug)]
pub enum DockerError {
    /// Connection errors
    #[error("Failed to connect to Docker: {0}")]
    Connection(String),

    /// Resource not found (deleted between display and action)
    #[error("{resource} no longer exists")]
    NotFound { resource: String },

    /// Container errors
    #[error("Container error: {0}")]
    Container(String),

    /// Image errors
    #[error("Image error: {0}")]
    Image(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Volume errors
    #[error("Volume error: {0}")]
    Volume(String),
}

/// UI-related errors
#[derive(Error, Debug)]
pub enum UiError {
    /// Terminal setup and restore errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Parse errors
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Validation errors
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// File not found
    #[error("Configuration file not found: {0}")]
    NotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DockdashError>;

impl DockdashError {
    /// Get a user-friendly error message for the notification bar
    pub fn user_message(&self) -> String {
        match self {
            DockdashError::Docker(DockerError::Connection(_)) => {
                "Could not connect to Docker. Please ensure Docker is running.".to_string()
            }
            DockdashError::Docker(DockerError::NotFound { resource }) => {
                format!("{} no longer exists", resource)
            }
            DockdashError::Config(ConfigError::NotFound(_)) => {
                "Configuration file not found. Using defaults.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Check whether this error means the acted-on resource disappeared
    pub fn is_not_found(&self) -> bool {
        matches!(self, DockdashError::Docker(DockerError::NotFound { .. }))
    }
}

impl From<toml::de::Error> for DockdashError {
    fn from(err: toml::de::Error) -> Self {
        DockdashError::Config(ConfigError::Parse(err.to_string()))
    }
}

impl From<toml::ser::Error> for DockdashError {
    fn from(err: toml::ser::Error) -> Self {
        DockdashError::Config(ConfigError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DockerError::NotFound {
            resource: "container abc123".to_string(),
        };
        assert_eq!(err.to_string(), "container abc123 no longer exists");
    }

    #[test]
    fn test_not_found_classification() {
        let gone = DockdashError::Docker(DockerError::NotFound {
            resource: "volume data".to_string(),
        });
        assert!(gone.is_not_found());

        let conn = DockdashError::Docker(DockerError::Connection("refused".to_string()));
        assert!(!conn.is_not_found());
    }

    #[test]
    fn test_user_messages() {
        let conn = DockdashError::Docker(DockerError::Connection("test".to_string()));
        assert!(conn.user_message().contains("Docker"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DockdashError = io_err.into();
        assert!(matches!(err, DockdashError::Io(_)));

        let ui_err = UiError::Terminal("raw mode: denied".to_string());
        let err: DockdashError = ui_err.into();
        assert_eq!(err.to_string(), "UI error: Terminal error: raw mode: denied");
    }
}
