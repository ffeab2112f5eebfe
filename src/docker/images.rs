//! Image operations

use bollard::image::{CreateImageOptions, ListImagesOptions, RemoveImageOptions};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::core::{DockerError, ImageSummary, Result};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

impl DockerClient {
    /// List all images
    pub async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        debug!("Listing images");

        let options = ListImagesOptions::<String>::default();

        let images = self
            .inner()
            .list_images(Some(options))
            .await
            .map_err(|e| DockerError::Image(e.to_string()))?;

        debug!("Found {} images", images.len());

        Ok(images.into_iter().map(Into::into).collect())
    }

    /// Pull an image, draining the progress stream to completion
    pub async fn pull_image(&self, reference: &str) -> Result<()> {
        let (repo, tag) = split_image_reference(reference);
        info!("Pulling image {}:{}", repo, tag);

        let options = CreateImageOptions {
            from_image: repo.to_string(),
            tag: tag.to_string(),
            ..Default::default()
        };

        let mut stream = self.inner().create_image(Some(options), None, None);

        while let Some(progress) = stream.next().await {
            progress.map_err(|e| {
                DockerError::Image(format!("Failed to pull {}: {}", reference, e))
            })?;
        }

        info!("Image {} pulled", reference);
        Ok(())
    }

    /// Remove an image
    pub async fn remove_image(&self, id: &str, force: bool) -> Result<()> {
        warn!("Removing image: {} (force={})", id, force);

        let options = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.inner()
            .remove_image(id, Some(options), None)
            .await
            .map_err(|e| engine_error(format!("image {}", id), e, DockerError::Image))?;

        Ok(())
    }
}

/// Split an image reference into repository and tag.
///
/// A trailing `:segment` is only a tag when it is not part of a registry
/// port (`localhost:5000/app` keeps its colon and defaults to `latest`).
fn split_image_reference(reference: &str) -> (&str, &str) {
    match reference.rfind(':') {
        Some(pos) => {
            let after = &reference[pos + 1..];
            if after.contains('/') || after.is_empty() {
                (reference, "latest")
            } else {
                (&reference[..pos], after)
            }
        }
        None => (reference, "latest"),
    }
}

impl From<bollard::models::ImageSummary> for ImageSummary {
    fn from(i: bollard::models::ImageSummary) -> Self {
        // "sha256:<hash>" -> first 12 hash characters
        let short_id = i
            .id
            .strip_prefix("sha256:")
            .unwrap_or(&i.id)
            .chars()
            .take(12)
            .collect();

        let dangling = i.repo_tags.is_empty() || i.repo_tags.iter().all(|t| t.contains("<none>"));

        Self {
            short_id,
            id: i.id,
            repo_tags: i.repo_tags,
            created: chrono::DateTime::from_timestamp(i.created, 0)
                .unwrap_or_else(chrono::Utc::now),
            size: i.size,
            containers: i.containers,
            dangling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_reference() {
        assert_eq!(split_image_reference("alpine"), ("alpine", "latest"));
    }

    #[test]
    fn test_split_tagged_reference() {
        assert_eq!(split_image_reference("alpine:3.19"), ("alpine", "3.19"));
    }

    #[test]
    fn test_split_registry_with_port() {
        assert_eq!(
            split_image_reference("localhost:5000/app"),
            ("localhost:5000/app", "latest")
        );
        assert_eq!(
            split_image_reference("localhost:5000/app:v2"),
            ("localhost:5000/app", "v2")
        );
    }

    #[test]
    fn test_dangling_detection() {
        let raw = bollard::models::ImageSummary {
            id: "sha256:0123456789abcdef".to_string(),
            repo_tags: vec!["<none>:<none>".to_string()],
            ..Default::default()
        };
        let summary: ImageSummary = raw.into();
        assert!(summary.dangling);
        assert_eq!(summary.short_id, "0123456789ab");
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_list_images() {
        let client = DockerClient::from_env().await.unwrap();
        let images = client.list_images().await;
        assert!(images.is_ok());
    }
}
