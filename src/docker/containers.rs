//! Container operations

use std::collections::HashMap;

use bollard::container::{
    Config, ListContainersOptions, RemoveContainerOptions, StopContainerOptions,
};
use bollard::models::{HostConfig, PortBinding};
use tracing::{debug, info, warn};

use crate::core::{ContainerState, ContainerSummary, DockerError, Result, RunSpec};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

impl DockerClient {
    /// List all containers
    pub async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>> {
        debug!("Listing containers (all={})", all);

        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };

        let containers = self
            .inner()
            .list_containers(Some(options))
            .await
            .map_err(|e| DockerError::Container(e.to_string()))?;

        debug!("Found {} containers", containers.len());

        Ok(containers.into_iter().map(Into::into).collect())
    }

    /// Start a container
    pub async fn start_container(&self, id: &str) -> Result<()> {
        info!("Starting container: {}", id);

        self.inner()
            .start_container::<String>(id, None)
            .await
            .map_err(|e| engine_error(format!("container {}", id), e, DockerError::Container))?;

        Ok(())
    }

    /// Stop a container with a grace period
    pub async fn stop_container(&self, id: &str, timeout_secs: i64) -> Result<()> {
        info!("Stopping container: {} (timeout={}s)", id, timeout_secs);

        let options = StopContainerOptions { t: timeout_secs };

        self.inner()
            .stop_container(id, Some(options))
            .await
            .map_err(|e| engine_error(format!("container {}", id), e, DockerError::Container))?;

        Ok(())
    }

    /// Remove a container
    pub async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        warn!("Removing container: {} (force={})", id, force);

        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.inner()
            .remove_container(id, Some(options))
            .await
            .map_err(|e| engine_error(format!("container {}", id), e, DockerError::Container))?;

        Ok(())
    }

    /// Pull, create, and start a container from a run spec.
    ///
    /// The three steps run in order and the first failure aborts the rest;
    /// a container created but not started is left in place for the user to
    /// inspect or remove.
    pub async fn run_container(&self, spec: &RunSpec) -> Result<String> {
        info!("Running container from image {}", spec.image);

        self.pull_image(&spec.image).await?;

        let id = self.create_container(spec).await?;
        self.start_container(&id).await?;

        info!("Container {} created and started", id);
        Ok(id)
    }

    async fn create_container(&self, spec: &RunSpec) -> Result<String> {
        let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();
        for port in &spec.ports {
            let key = format!("{}/tcp", port.container_port);
            exposed_ports.insert(key.clone(), HashMap::new());
            port_bindings
                .entry(key)
                .or_insert_with(|| Some(Vec::new()))
                .get_or_insert_with(Vec::new)
                .push(PortBinding {
                    host_ip: None,
                    host_port: Some(port.host_port.clone()),
                });
        }

        let host_config = HostConfig {
            port_bindings: (!port_bindings.is_empty()).then_some(port_bindings),
            memory: spec.memory_mb.map(|mb| mb * 1024 * 1024),
            cpu_shares: spec.cpu_shares,
            privileged: Some(spec.privileged),
            ..Default::default()
        };

        let config = Config {
            image: Some(spec.image.clone()),
            cmd: (!spec.command.is_empty()).then(|| spec.command.clone()),
            env: (!spec.env.is_empty()).then(|| spec.env.clone()),
            exposed_ports: (!exposed_ports.is_empty()).then_some(exposed_ports),
            host_config: Some(host_config),
            ..Default::default()
        };

        let response = self
            .inner()
            .create_container::<String, String>(None, config)
            .await
            .map_err(|e| {
                DockerError::Container(format!("Failed to create from {}: {}", spec.image, e))
            })?;

        Ok(response.id)
    }
}

// Conversion implementations
impl From<bollard::models::ContainerSummary> for ContainerSummary {
    fn from(c: bollard::models::ContainerSummary) -> Self {
        let id = c.id.unwrap_or_default();
        let short_id = id.chars().take(12).collect();

        let state = parse_container_state(c.state.as_deref());

        // Engine-reported names carry a leading slash
        let names: Vec<String> = c
            .names
            .unwrap_or_default()
            .into_iter()
            .map(|n| n.trim_start_matches('/').to_string())
            .collect();

        let ports: Vec<_> = c
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(|p| crate::core::PortMapping {
                ip: p.ip,
                private_port: p.private_port as u16,
                public_port: p.public_port.map(|p| p as u16),
                protocol: p
                    .typ
                    .map(|t| format!("{:?}", t).to_lowercase())
                    .unwrap_or_else(|| "tcp".to_string()),
            })
            .collect();

        Self {
            id,
            short_id,
            names,
            image: c.image.unwrap_or_default(),
            command: c.command.unwrap_or_default(),
            created: chrono::DateTime::from_timestamp(c.created.unwrap_or(0), 0)
                .unwrap_or_else(chrono::Utc::now),
            ports,
            state,
            status: c.status.unwrap_or_default(),
            networks: c
                .network_settings
                .map(|ns| ns.networks.unwrap_or_default().into_keys().collect())
                .unwrap_or_default(),
        }
    }
}

fn parse_container_state(state: Option<&str>) -> ContainerState {
    match state {
        Some("created") => ContainerState::Created,
        Some("running") => ContainerState::Running,
        Some("paused") => ContainerState::Paused,
        Some("restarting") => ContainerState::Restarting,
        Some("removing") => ContainerState::Removing,
        Some("exited") => ContainerState::Exited,
        Some("dead") => ContainerState::Dead,
        _ => ContainerState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container_state() {
        assert_eq!(
            parse_container_state(Some("running")),
            ContainerState::Running
        );
        assert_eq!(parse_container_state(Some("exited")), ContainerState::Exited);
        assert_eq!(parse_container_state(Some("paused")), ContainerState::Paused);
        assert_eq!(parse_container_state(None), ContainerState::Unknown);
    }

    #[test]
    fn test_summary_conversion_strips_name_slash() {
        let raw = bollard::models::ContainerSummary {
            id: Some("abc123def456789".to_string()),
            names: Some(vec!["/web".to_string()]),
            image: Some("nginx:latest".to_string()),
            state: Some("running".to_string()),
            status: Some("Up 2 hours".to_string()),
            ..Default::default()
        };
        let summary: ContainerSummary = raw.into();
        assert_eq!(summary.short_id, "abc123def456");
        assert_eq!(summary.names, vec!["web".to_string()]);
        assert_eq!(summary.state, ContainerState::Running);
    }

    // Integration tests require Docker daemon
    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_list_containers() {
        use crate::docker::DockerClient;
        let client = DockerClient::from_env().await.unwrap();
        let containers = client.list_containers(true).await;
        assert!(containers.is_ok());
    }
}
