//! Docker Engine API layer built on bollard

pub mod client;
pub mod containers;
pub mod images;
pub mod inspect;
pub mod logs;
pub mod networks;
pub mod stats;
pub mod volumes;

pub use client::DockerClient;
pub use inspect::ContainerDetails;
pub use logs::LogEntry;
pub use stats::{format_bytes, StatsEntry};
