//! Core type definitions and shared types

/// Type alias for container IDs
pub type ContainerId = String;

/// Type alias for image IDs
pub type ImageId = String;

/// Type alias for volume names
pub type VolumeName = String;

/// Type alias for network IDs
pub type NetworkId = String;

/// Notification level for status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "INFO"),
            NotificationLevel::Success => write!(f, "SUCCESS"),
            NotificationLevel::Warning => write!(f, "WARNING"),
            NotificationLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Containers,
    Images,
    Volumes,
    Networks,
    Settings,
}

impl Tab {
    /// Get all available tabs
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Containers,
            Tab::Images,
            Tab::Volumes,
            Tab::Networks,
            Tab::Settings,
        ]
    }

    /// Get the display name for this tab
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Containers => "Containers",
            Tab::Images => "Images",
            Tab::Volumes => "Volumes",
            Tab::Networks => "Networks",
            Tab::Settings => "Settings",
        }
    }

    /// Get the shortcut key for this tab (1-5)
    pub fn shortcut(&self) -> char {
        match self {
            Tab::Containers => '1',
            Tab::Images => '2',
            Tab::Volumes => '3',
            Tab::Networks => '4',
            Tab::Settings => '5',
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_properties() {
        assert_eq!(Tab::Containers.name(), "Containers");
        assert_eq!(Tab::Containers.shortcut(), '1');
        assert_eq!(Tab::Settings.shortcut(), '5');
        assert_eq!(Tab::all().len(), 5);
    }

    #[test]
    fn test_notification_level_display() {
        assert_eq!(NotificationLevel::Error.to_string(), "ERROR");
        assert_eq!(NotificationLevel::Success.to_string(), "SUCCESS");
    }
}
