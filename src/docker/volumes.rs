//! Volume operations

use bollard::volume::{CreateVolumeOptions, ListVolumesOptions, RemoveVolumeOptions};
use tracing::{debug, info, warn};

use crate::core::{DockerError, Result, VolumeScope, VolumeSummary};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

impl DockerClient {
    /// List all volumes
    pub async fn list_volumes(&self) -> Result<Vec<VolumeSummary>> {
        debug!("Listing volumes");

        let options = ListVolumesOptions::<String>::default();

        let volumes = self
            .inner()
            .list_volumes(Some(options))
            .await
            .map_err(|e| DockerError::Volume(e.to_string()))?;

        let volume_list = volumes.volumes.unwrap_or_default();
        debug!("Found {} volumes", volume_list.len());

        Ok(volume_list.into_iter().map(Into::into).collect())
    }

    /// Create a named volume with the default local driver
    pub async fn create_volume(&self, name: &str) -> Result<VolumeSummary> {
        info!("Creating volume: {}", name);

        let options = CreateVolumeOptions {
            name: name.to_string(),
            ..Default::default()
        };

        let volume = self
            .inner()
            .create_volume(options)
            .await
            .map_err(|e| DockerError::Volume(format!("Failed to create {}: {}", name, e)))?;

        Ok(volume.into())
    }

    /// Remove a volume
    pub async fn remove_volume(&self, name: &str, force: bool) -> Result<()> {
        warn!("Removing volume: {} (force={})", name, force);

        self.inner()
            .remove_volume(name, Some(RemoveVolumeOptions { force }))
            .await
            .map_err(|e| engine_error(format!("volume {}", name), e, DockerError::Volume))?;

        Ok(())
    }
}

impl From<bollard::models::Volume> for VolumeSummary {
    fn from(v: bollard::models::Volume) -> Self {
        let scope = match v.scope {
            Some(bollard::models::VolumeScopeEnum::GLOBAL) => VolumeScope::Global,
            _ => VolumeScope::Local,
        };

        Self {
            name: v.name,
            driver: v.driver,
            mountpoint: v.mountpoint,
            created_at: v
                .created_at
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(chrono::Utc::now),
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_conversion_defaults_to_local_scope() {
        let raw = bollard::models::Volume {
            name: "data".to_string(),
            driver: "local".to_string(),
            mountpoint: "/var/lib/docker/volumes/data/_data".to_string(),
            ..Default::default()
        };
        let summary: VolumeSummary = raw.into();
        assert_eq!(summary.name, "data");
        assert_eq!(summary.scope, VolumeScope::Local);
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_list_volumes() {
        let client = DockerClient::from_env().await.unwrap();
        let volumes = client.list_volumes().await;
        assert!(volumes.is_ok());
    }
}
