//! Network operations

use std::collections::HashMap;

use bollard::network::{CreateNetworkOptions, ListNetworksOptions};
use tracing::{debug, info, warn};

use crate::core::{DockerError, NetworkCreateSpec, NetworkScope, NetworkSummary, Result};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

impl DockerClient {
    /// List all networks
    pub async fn list_networks(&self) -> Result<Vec<NetworkSummary>> {
        debug!("Listing networks");

        let options = ListNetworksOptions::<String> {
            filters: Default::default(),
        };

        let networks = self
            .inner()
            .list_networks(Some(options))
            .await
            .map_err(|e| DockerError::Network(e.to_string()))?;

        debug!("Found {} networks", networks.len());

        Ok(networks.into_iter().map(Into::into).collect())
    }

    /// Create a network.
    ///
    /// For the macvlan driver the parent interface, when supplied, is passed
    /// through as the `parent` driver option.
    pub async fn create_network(&self, spec: &NetworkCreateSpec) -> Result<()> {
        info!("Creating network {} (driver={})", spec.name, spec.driver);

        let mut options: HashMap<String, String> = HashMap::new();
        if spec.driver == "macvlan" {
            if let Some(parent) = spec.macvlan_parent.as_deref().filter(|p| !p.is_empty()) {
                options.insert("parent".to_string(), parent.to_string());
            }
        }

        let create = CreateNetworkOptions {
            name: spec.name.clone(),
            driver: spec.driver.clone(),
            options,
            ..Default::default()
        };

        self.inner()
            .create_network(create)
            .await
            .map_err(|e| DockerError::Network(format!("Failed to create {}: {}", spec.name, e)))?;

        info!("Network {} created", spec.name);
        Ok(())
    }

    /// Remove a network
    pub async fn remove_network(&self, id: &str) -> Result<()> {
        warn!("Removing network: {}", id);

        self.inner()
            .remove_network(id)
            .await
            .map_err(|e| engine_error(format!("network {}", id), e, DockerError::Network))?;

        Ok(())
    }
}

impl From<bollard::models::Network> for NetworkSummary {
    fn from(n: bollard::models::Network) -> Self {
        let scope = match n.scope.as_deref() {
            Some("global") => NetworkScope::Global,
            Some("swarm") => NetworkScope::Swarm,
            _ => NetworkScope::Local,
        };

        let id = n.id.unwrap_or_default();
        let short_id = id.chars().take(12).collect();

        Self {
            id,
            short_id,
            name: n.name.unwrap_or_default(),
            driver: n.driver.unwrap_or_else(|| "bridge".to_string()),
            scope,
            created: n
                .created
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(chrono::Utc::now),
            internal: n.internal.unwrap_or(false),
            attachable: n.attachable.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_conversion() {
        let raw = bollard::models::Network {
            id: Some("0123456789abcdef0123".to_string()),
            name: Some("bridge".to_string()),
            driver: Some("bridge".to_string()),
            scope: Some("local".to_string()),
            ..Default::default()
        };
        let summary: NetworkSummary = raw.into();
        assert_eq!(summary.short_id, "0123456789ab");
        assert_eq!(summary.scope, NetworkScope::Local);
        assert!(!summary.internal);
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_list_networks() {
        let client = DockerClient::from_env().await.unwrap();
        let networks = client.list_networks().await;
        assert!(networks.is_ok());
    }
}
