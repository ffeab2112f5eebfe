use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod run_spec;
pub mod types;

pub use errors::*;
pub use run_spec::{parse_env_spec, parse_port_spec, PortSpec, RunSpec};
pub use types::{ContainerId, ImageId, NetworkId, NotificationLevel, Tab, VolumeName};

/// Default Docker daemon endpoint when nothing is configured
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Docker connection information reported by the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub host: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            host: "unknown".to_string(),
            version: "unknown".to_string(),
            api_version: "unknown".to_string(),
            os: "unknown".to_string(),
            arch: "unknown".to_string(),
        }
    }
}

/// User-editable connection parameters for the Settings tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub ca_path: String,
    pub cert_path: String,
    pub key_path: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_DOCKER_HOST.to_string(),
            ca_path: String::new(),
            cert_path: String::new(),
            key_path: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// TLS material for a mutual-TLS connection.
    ///
    /// Returns `Some` only when all three of CA, cert, and key are set;
    /// a partial set is ignored entirely.
    pub fn tls_material(&self) -> Option<(&str, &str, &str)> {
        let ca = self.ca_path.trim();
        let cert = self.cert_path.trim();
        let key = self.key_path.trim();
        if ca.is_empty() || cert.is_empty() || key.is_empty() {
            return None;
        }
        Some((ca, cert, key))
    }
}

/// Port mapping information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortMapping {
    pub ip: Option<String>,
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: String,
}

/// Container runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContainerState::Created => "Created",
            ContainerState::Running => "Running",
            ContainerState::Paused => "Paused",
            ContainerState::Restarting => "Restarting",
            ContainerState::Removing => "Removing",
            ContainerState::Exited => "Exited",
            ContainerState::Dead => "Dead",
            ContainerState::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Container summary for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    pub short_id: String,
    pub names: Vec<String>,
    pub image: String,
    pub command: String,
    pub created: DateTime<Utc>,
    pub ports: Vec<PortMapping>,
    pub state: ContainerState,
    pub status: String,
    pub networks: Vec<String>,
}

impl Default for ContainerSummary {
    fn default() -> Self {
        Self {
            id: String::new(),
            short_id: String::new(),
            names: vec![],
            image: String::new(),
            command: String::new(),
            created: Utc::now(),
            ports: vec![],
            state: ContainerState::Unknown,
            status: String::new(),
            networks: vec![],
        }
    }
}

/// Image summary for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    pub id: String,
    pub short_id: String,
    pub repo_tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub size: i64,
    pub containers: i64,
    pub dangling: bool,
}

/// Volume summary for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub created_at: DateTime<Utc>,
    pub scope: VolumeScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeScope {
    Local,
    Global,
}

impl std::fmt::Display for VolumeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeScope::Local => write!(f, "local"),
            VolumeScope::Global => write!(f, "global"),
        }
    }
}

/// Network summary for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub driver: String,
    pub scope: NetworkScope,
    pub created: DateTime<Utc>,
    pub internal: bool,
    pub attachable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkScope {
    Local,
    Global,
    Swarm,
}

impl std::fmt::Display for NetworkScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkScope::Local => write!(f, "local"),
            NetworkScope::Global => write!(f, "global"),
            NetworkScope::Swarm => write!(f, "swarm"),
        }
    }
}

/// Parameters for creating a network from the form
#[derive(Debug, Clone)]
pub struct NetworkCreateSpec {
    pub name: String,
    pub driver: String,
    /// Parent interface, passed as the `parent` option for macvlan networks
    pub macvlan_parent: Option<String>,
}

/// Actions emitted by the UI, dispatched as engine calls by the coordinator.
///
/// Each action carries the stable identifier captured from the displayed
/// snapshot at keypress time, never a positional index.
#[derive(Debug, Clone)]
pub enum UiAction {
    Refresh(Tab),
    RefreshAll,
    StartContainer(ContainerId),
    StopContainer(ContainerId),
    RemoveContainer(ContainerId),
    ShowLogs { id: ContainerId, name: String },
    ShowStats { id: ContainerId, name: String },
    InspectContainer { id: ContainerId, name: String },
    RunContainer(RunSpec),
    PullImage(String),
    RemoveImage(ImageId),
    CreateVolume(VolumeName),
    RemoveVolume(VolumeName),
    CreateNetwork(NetworkCreateSpec),
    RemoveNetwork(NetworkId),
    ApplySettings(ConnectionSettings),
}
