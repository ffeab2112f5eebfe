//! Text-entry forms for resource creation and settings

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::ConnectionSettings;

/// One editable line in a form
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
}

impl FormField {
    fn new(label: &str, value: &str, placeholder: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Which creation flow a modal form drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    PullImage,
    CreateVolume,
    CreateNetwork,
    RunContainer,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::PullImage => "Pull Image",
            FormKind::CreateVolume => "Create Volume",
            FormKind::CreateNetwork => "Create Network",
            FormKind::RunContainer => "Run Container",
        }
    }
}

/// Result of feeding a key event to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    None,
    Cancel,
    Submit,
}

/// A modal form: a titled stack of fields with one focused at a time
#[derive(Debug, Clone)]
pub struct ResourceForm {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl ResourceForm {
    pub fn pull_image() -> Self {
        Self {
            kind: FormKind::PullImage,
            fields: vec![FormField::new("Image", "alpine", "repository[:tag]")],
            focused: 0,
        }
    }

    pub fn create_volume() -> Self {
        Self {
            kind: FormKind::CreateVolume,
            fields: vec![FormField::new("Name", "", "volume name")],
            focused: 0,
        }
    }

    pub fn create_network() -> Self {
        Self {
            kind: FormKind::CreateNetwork,
            fields: vec![
                FormField::new("Name", "", "network name"),
                FormField::new("Driver", "bridge", "bridge, overlay, macvlan"),
                FormField::new("Macvlan Parent", "", "eth0 (macvlan only)"),
            ],
            focused: 0,
        }
    }

    pub fn run_container() -> Self {
        Self {
            kind: FormKind::RunContainer,
            fields: vec![
                FormField::new("Image", "alpine", "repository[:tag]"),
                FormField::new("Command", "echo hello world", "command and args"),
                FormField::new("Env", "", "KEY=value,KEY2=value2"),
                FormField::new("Ports", "", "8080:80,8443:443"),
                FormField::new("Memory (MB)", "", "512"),
                FormField::new("CPU Shares", "", "1024"),
                FormField::new("Privileged", "no", "yes/no"),
            ],
            focused: 0,
        }
    }

    /// Value of the field with the given label, trimmed
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.trim())
            .unwrap_or("")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => FormEvent::Cancel,
            KeyCode::Enter => FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focused = (self.focused + 1) % self.fields.len();
                FormEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
                FormEvent::None
            }
            KeyCode::Backspace => {
                self.fields[self.focused].value.pop();
                FormEvent::None
            }
            KeyCode::Char(c) => {
                self.fields[self.focused].value.push(c);
                FormEvent::None
            }
            _ => FormEvent::None,
        }
    }
}

/// Editable connection parameters shown on the Settings tab
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl SettingsForm {
    pub fn from_settings(settings: &ConnectionSettings) -> Self {
        Self {
            fields: vec![
                FormField::new("Host", &settings.host, "unix:// or tcp:// endpoint"),
                FormField::new("CA Path", &settings.ca_path, "/path/to/ca.pem"),
                FormField::new("Cert Path", &settings.cert_path, "/path/to/cert.pem"),
                FormField::new("Key Path", &settings.key_path, "/path/to/key.pem"),
            ],
            focused: 0,
        }
    }

    pub fn to_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.fields[0].value.trim().to_string(),
            ca_path: self.fields[1].value.trim().to_string(),
            cert_path: self.fields[2].value.trim().to_string(),
            key_path: self.fields[3].value.trim().to_string(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Enter => FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focused = (self.focused + 1) % self.fields.len();
                FormEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
                FormEvent::None
            }
            KeyCode::Backspace => {
                self.fields[self.focused].value.pop();
                FormEvent::None
            }
            KeyCode::Char(c) => {
                self.fields[self.focused].value.push(c);
                FormEvent::None
            }
            _ => FormEvent::None,
        }
    }
}
