//! UI-facing state: tab contents, overlays, forms, notifications

pub mod app_state;
pub mod forms;

pub use app_state::{
    AppState, DetailViewState, LogViewState, Notification, Overlay, StatsViewState,
};
pub use forms::{FormEvent, FormField, FormKind, ResourceForm, SettingsForm};
