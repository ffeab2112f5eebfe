use std::path::Path;
use std::sync::Arc;

use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::{debug, info};

use crate::core::{ConnectionInfo, ConnectionSettings, DockerError, Result};

/// Connection timeout in seconds for all transports
const CONNECT_TIMEOUT_SECS: u64 = 120;

/// Docker client wrapper.
///
/// Cheap to clone: worker tasks take their own clone, so swapping the
/// app-level client never invalidates a call already in flight, and a
/// replaced handle is dropped once its last clone finishes.
#[derive(Clone)]
pub struct DockerClient {
    inner: Arc<Docker>,
    connection_info: ConnectionInfo,
}

impl DockerClient {
    /// Create a new client from environment (DOCKER_HOST, etc.)
    pub async fn from_env() -> Result<Self> {
        info!("Creating Docker client from environment");

        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        Self::new(docker, "local".to_string()).await
    }

    /// Create a new client from the Settings tab values.
    ///
    /// `unix://` hosts use the socket transport, anything else plain HTTP;
    /// mutual TLS is attempted only when CA, cert, and key are all present.
    /// The API version is negotiated with the daemon before first use.
    pub async fn from_settings(settings: &ConnectionSettings) -> Result<Self> {
        let host = settings.host.trim();
        info!("Creating Docker client for host: {}", host);

        let docker = if let Some((ca, cert, key)) = settings.tls_material() {
            Docker::connect_with_ssl(
                host,
                Path::new(key),
                Path::new(cert),
                Path::new(ca),
                CONNECT_TIMEOUT_SECS,
                API_DEFAULT_VERSION,
            )
        } else if host.is_empty() {
            Docker::connect_with_local_defaults()
        } else if host.starts_with("unix://") {
            Docker::connect_with_socket(host, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
        } else {
            Docker::connect_with_http(host, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
        }
        .map_err(|e| DockerError::Connection(e.to_string()))?;

        let docker = docker
            .negotiate_version()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        Self::new(docker, host.to_string()).await
    }

    /// Internal constructor
    async fn new(docker: Docker, host: String) -> Result<Self> {
        debug!("Fetching Docker version information");

        let version = docker
            .version()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        let info = ConnectionInfo {
            host,
            version: version.version.unwrap_or_else(|| "unknown".to_string()),
            api_version: version.api_version.unwrap_or_else(|| "unknown".to_string()),
            os: version.os.unwrap_or_else(|| "unknown".to_string()),
            arch: version.arch.unwrap_or_else(|| "unknown".to_string()),
        };

        info!(
            "Docker client initialized: {} (API: {}) on {}/{}",
            info.version, info.api_version, info.os, info.arch
        );

        Ok(Self {
            inner: Arc::new(docker),
            connection_info: info,
        })
    }

    /// Get connection information
    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.connection_info
    }

    /// Ping the Docker daemon
    pub async fn ping(&self) -> Result<String> {
        debug!("Pinging Docker daemon");

        let response = self
            .inner
            .ping()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        Ok(response)
    }

    /// Get the inner Docker client (for advanced usage)
    pub fn inner(&self) -> &Docker {
        &self.inner
    }
}

/// Map an engine error for an operation on a specific resource.
///
/// A 404 means the resource was deleted between display and action, so it
/// becomes `NotFound` regardless of the operation; everything else is
/// wrapped with the per-kind constructor.
pub(crate) fn engine_error(
    resource: impl Into<String>,
    err: bollard::errors::Error,
    wrap: fn(String) -> DockerError,
) -> DockerError {
    let resource = resource.into();
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => DockerError::NotFound { resource },
        e => wrap(format!("{}: {}", resource, e)),
    }
}
