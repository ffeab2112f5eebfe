//! One-shot container resource statistics

use bollard::container::{Stats, StatsOptions};
use futures::StreamExt;
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::core::{DockerError, Result};
use crate::docker::DockerClient;

/// How long to wait for the daemon to produce a stats sample
const STATS_TIMEOUT_SECS: u64 = 5;

/// A point-in-time resource snapshot for one container
#[derive(Debug, Clone, Default)]
pub struct StatsEntry {
    pub cpu_percent: f64,
    pub memory_usage: u64,
    pub memory_limit: u64,
    pub memory_percent: f64,
    pub network_rx: u64,
    pub network_tx: u64,
    pub block_read: u64,
    pub block_write: u64,
    pub pids: u64,
}

impl DockerClient {
    /// Fetch a single stats sample for a container.
    ///
    /// The daemon needs two readings to compute CPU deltas, so a non-streaming
    /// request can take close to a second to answer.
    pub async fn fetch_stats(&self, id: &str) -> Result<StatsEntry> {
        debug!("Fetching stats for container: {}", id);

        let options = StatsOptions {
            stream: false,
            one_shot: false,
        };

        let mut stream = self.inner().stats(id, Some(options));

        let sample = timeout(Duration::from_secs(STATS_TIMEOUT_SECS), stream.next())
            .await
            .map_err(|_| DockerError::Container(format!("Stats timed out for {}", id)))?
            .ok_or_else(|| DockerError::Container(format!("No stats returned for {}", id)))?
            .map_err(|e| {
                crate::docker::client::engine_error(
                    format!("container {}", id),
                    e,
                    DockerError::Container,
                )
            })?;

        Ok(calculate(&sample))
    }
}

/// CPU usage percentage from the sample's usage deltas.
///
/// Zero deltas (first sample, stopped container) yield 0.0 rather than NaN.
pub fn cpu_percent(cpu_delta: u64, system_delta: u64, online_cpus: u64) -> f64 {
    if cpu_delta == 0 || system_delta == 0 {
        return 0.0;
    }
    (cpu_delta as f64 / system_delta as f64) * online_cpus as f64 * 100.0
}

/// Memory usage percentage, 0.0 when the limit is unset
pub fn memory_percent(usage: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    (usage as f64 / limit as f64) * 100.0
}

fn calculate(stats: &Stats) -> StatsEntry {
    let cpu_delta = stats
        .cpu_stats
        .cpu_usage
        .total_usage
        .saturating_sub(stats.precpu_stats.cpu_usage.total_usage);
    let system_delta = stats
        .cpu_stats
        .system_cpu_usage
        .unwrap_or(0)
        .saturating_sub(stats.precpu_stats.system_cpu_usage.unwrap_or(0));
    let online_cpus = stats.cpu_stats.online_cpus.unwrap_or(1).max(1);

    let memory_usage = stats.memory_stats.usage.unwrap_or(0);
    let memory_limit = stats.memory_stats.limit.unwrap_or(0);

    let (network_rx, network_tx) = stats
        .networks
        .as_ref()
        .map(|nets| {
            nets.values().fold((0u64, 0u64), |(rx, tx), n| {
                (rx + n.rx_bytes, tx + n.tx_bytes)
            })
        })
        .unwrap_or((0, 0));

    let (block_read, block_write) = stats
        .blkio_stats
        .io_service_bytes_recursive
        .as_ref()
        .map(|entries| {
            entries.iter().fold((0u64, 0u64), |(read, write), e| {
                if e.op.eq_ignore_ascii_case("read") {
                    (read + e.value, write)
                } else if e.op.eq_ignore_ascii_case("write") {
                    (read, write + e.value)
                } else {
                    (read, write)
                }
            })
        })
        .unwrap_or((0, 0));

    StatsEntry {
        cpu_percent: cpu_percent(cpu_delta, system_delta, online_cpus),
        memory_usage,
        memory_limit,
        memory_percent: memory_percent(memory_usage, memory_limit),
        network_rx,
        network_tx,
        block_read,
        block_write,
        pids: stats.pids_stats.current.unwrap_or(0),
    }
}

/// Format a byte count with binary units
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_percent() {
        assert_eq!(cpu_percent(200, 1000, 2), 40.0);
        assert_eq!(cpu_percent(0, 1000, 2), 0.0);
        assert_eq!(cpu_percent(200, 0, 2), 0.0);
    }

    #[test]
    fn test_memory_percent() {
        assert_eq!(memory_percent(50_000_000, 100_000_000), 50.0);
        assert_eq!(memory_percent(50_000_000, 0), 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_fetch_stats_missing_container() {
        let client = DockerClient::from_env().await.unwrap();
        let result = client.fetch_stats("does-not-exist").await;
        assert!(result.is_err());
    }
}
