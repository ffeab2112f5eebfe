//! Shared application state

use uuid::Uuid;

use crate::core::{ConnectionInfo, NotificationLevel, Tab};
use crate::docker::{ContainerDetails, LogEntry, StatsEntry};
use crate::state::forms::{ResourceForm, SettingsForm};

/// Maximum notifications retained
const MAX_NOTIFICATIONS: usize = 10;

/// A transient status message
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
}

/// Scrollable snapshot of one container's logs
#[derive(Debug, Clone, Default)]
pub struct LogViewState {
    pub container_name: String,
    pub entries: Vec<LogEntry>,
    pub scroll: usize,
    pub error: Option<String>,
}

/// One-shot stats snapshot for one container
#[derive(Debug, Clone, Default)]
pub struct StatsViewState {
    pub container_name: String,
    pub stats: Option<StatsEntry>,
    pub error: Option<String>,
}

/// Flattened inspect output for one container
#[derive(Debug, Clone, Default)]
pub struct DetailViewState {
    pub container_name: String,
    pub details: Option<ContainerDetails>,
    pub scroll: usize,
    pub error: Option<String>,
}

/// Full-screen overlay currently on top of the tab content
#[derive(Debug, Clone)]
pub enum Overlay {
    Logs(LogViewState),
    Stats(StatsViewState),
    Inspect(DetailViewState),
}

/// Application state shared between the event loop and the renderer
pub struct AppState {
    pub current_tab: Tab,
    pub docker_connected: bool,
    pub connection_info: ConnectionInfo,
    pub notifications: Vec<Notification>,
    /// Set while a worker task is in flight, cleared when its outcome lands
    pub loading: bool,
    pub overlay: Option<Overlay>,
    pub form: Option<ResourceForm>,
    pub settings: SettingsForm,
}

impl AppState {
    pub fn new(connection_info: ConnectionInfo, settings: SettingsForm) -> Self {
        Self {
            current_tab: Tab::Containers,
            docker_connected: true,
            connection_info,
            notifications: Vec::new(),
            loading: false,
            overlay: None,
            form: None,
            settings,
        }
    }

    /// Add a notification, dropping the oldest past the cap
    pub fn add_notification(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(
            ConnectionInfo::default(),
            SettingsForm::from_settings(&Default::default()),
        )
    }

    #[test]
    fn test_notifications_are_capped() {
        let mut state = state();
        for i in 0..15 {
            state.add_notification(NotificationLevel::Info, format!("message {}", i));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.last_notification().unwrap().message, "message 14");
        assert_eq!(state.notifications[0].message, "message 5");
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.current_tab, Tab::Containers);
        assert!(state.overlay.is_none());
        assert!(!state.loading);
    }
}
