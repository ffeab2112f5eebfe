//! Container inspection, flattened for the detail overlay

use bollard::container::InspectContainerOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DockerError, Result};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

/// Inspection details for a single container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerDetails {
    pub id: String,
    pub name: String,
    pub image: String,
    pub command: String,
    pub status: String,
    pub created: String,
    pub ports: Vec<String>,
    pub mounts: Vec<String>,
    pub env: Vec<String>,
    pub networks: Vec<String>,
}

impl DockerClient {
    /// Inspect a container
    pub async fn inspect_container(&self, id: &str) -> Result<ContainerDetails> {
        debug!("Inspecting container: {}", id);

        let response = self
            .inner()
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| engine_error(format!("container {}", id), e, DockerError::Container))?;

        Ok(flatten_inspect(response))
    }
}

fn flatten_inspect(r: bollard::models::ContainerInspectResponse) -> ContainerDetails {
    let config = r.config.unwrap_or_default();

    let command = config
        .cmd
        .map(|cmd| cmd.join(" "))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| r.path.unwrap_or_default());

    let status = r
        .state
        .as_ref()
        .and_then(|s| s.status)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let ports = r
        .network_settings
        .as_ref()
        .and_then(|ns| ns.ports.clone())
        .unwrap_or_default()
        .into_iter()
        .map(|(container_port, bindings)| {
            let hosts: Vec<String> = bindings
                .unwrap_or_default()
                .into_iter()
                .map(|b| {
                    format!(
                        "{}:{}",
                        b.host_ip.unwrap_or_else(|| "0.0.0.0".to_string()),
                        b.host_port.unwrap_or_default()
                    )
                })
                .collect();
            if hosts.is_empty() {
                container_port
            } else {
                format!("{} -> {}", container_port, hosts.join(", "))
            }
        })
        .collect();

    let mounts = r
        .mounts
        .unwrap_or_default()
        .into_iter()
        .map(|m| {
            format!(
                "{} -> {}",
                m.source.unwrap_or_default(),
                m.destination.unwrap_or_default()
            )
        })
        .collect();

    let networks = r
        .network_settings
        .and_then(|ns| ns.networks)
        .map(|n| n.into_keys().collect())
        .unwrap_or_default();

    ContainerDetails {
        id: r.id.unwrap_or_default(),
        name: r
            .name
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_default(),
        image: config.image.unwrap_or_default(),
        command,
        status,
        created: r.created.unwrap_or_default(),
        ports,
        mounts,
        env: config.env.unwrap_or_default(),
        networks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_strips_name_slash() {
        let response = bollard::models::ContainerInspectResponse {
            id: Some("abc123".to_string()),
            name: Some("/web".to_string()),
            ..Default::default()
        };
        let details = flatten_inspect(response);
        assert_eq!(details.name, "web");
        assert_eq!(details.status, "unknown");
    }

    #[test]
    fn test_flatten_joins_command() {
        let response = bollard::models::ContainerInspectResponse {
            config: Some(bollard::models::ContainerConfig {
                cmd: Some(vec!["echo".to_string(), "hello".to_string()]),
                image: Some("alpine".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let details = flatten_inspect(response);
        assert_eq!(details.command, "echo hello");
        assert_eq!(details.image, "alpine");
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_inspect_missing_container_is_not_found() {
        let client = DockerClient::from_env().await.unwrap();
        let result = client.inspect_container("does-not-exist").await;
        assert!(result.is_err());
    }
}
