//! One-shot container log retrieval

use bollard::container::{LogOutput, LogsOptions};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tracing::debug;

use crate::core::{DockerError, Result};
use crate::docker::client::engine_error;
use crate::docker::DockerClient;

/// A single log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: String,
    pub is_stderr: bool,
}

impl DockerClient {
    /// Fetch the last `tail` log lines of a container.
    ///
    /// The snapshot is taken once; the viewer does not follow the stream.
    pub async fn fetch_logs(&self, id: &str, tail: u64) -> Result<Vec<LogEntry>> {
        debug!("Fetching {} log lines for container {}", tail, id);

        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            timestamps: true,
            follow: false,
            tail: tail.to_string(),
            ..Default::default()
        };

        let mut stream = self.inner().logs(id, Some(options));
        let mut entries = Vec::new();

        while let Some(output) = stream.next().await {
            let output = output
                .map_err(|e| engine_error(format!("container {}", id), e, DockerError::Container))?;
            if let Some(entry) = parse_log_output(output) {
                entries.push(entry);
            }
        }

        debug!("Fetched {} log entries", entries.len());
        Ok(entries)
    }
}

fn parse_log_output(output: LogOutput) -> Option<LogEntry> {
    let (bytes, is_stderr) = match output {
        LogOutput::StdOut { message } => (message, false),
        LogOutput::Console { message } => (message, false),
        LogOutput::StdErr { message } => (message, true),
        LogOutput::StdIn { .. } => return None,
    };

    let line = String::from_utf8_lossy(&bytes);
    let (timestamp, message) = split_timestamp(line.trim_end_matches(['\n', '\r']));

    Some(LogEntry {
        timestamp,
        message: message.to_string(),
        is_stderr,
    })
}

/// Split the engine's RFC 3339 timestamp prefix off a log line.
///
/// Lines without a parseable prefix are kept whole.
fn split_timestamp(line: &str) -> (Option<DateTime<Utc>>, &str) {
    if let Some((prefix, rest)) = line.split_once(' ') {
        if let Ok(ts) = DateTime::parse_from_rfc3339(prefix) {
            return (Some(ts.with_timezone(&Utc)), rest);
        }
    }
    (None, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_timestamp() {
        let (ts, msg) = split_timestamp("2024-05-01T12:00:00.123456789Z server started");
        assert!(ts.is_some());
        assert_eq!(msg, "server started");
    }

    #[test]
    fn test_split_timestamp_missing_prefix() {
        let (ts, msg) = split_timestamp("plain line without timestamp");
        assert!(ts.is_none());
        assert_eq!(msg, "plain line without timestamp");
    }

    #[test]
    fn test_parse_log_output_marks_stderr() {
        let output = LogOutput::StdErr {
            message: "2024-05-01T12:00:00Z oops\n".into(),
        };
        let entry = parse_log_output(output).unwrap();
        assert!(entry.is_stderr);
        assert_eq!(entry.message, "oops");
    }

    // Note: These tests require Docker to be running

    #[tokio::test]
    #[ignore = "requires Docker daemon"]
    async fn test_fetch_logs_missing_container() {
        let client = DockerClient::from_env().await.unwrap();
        let result = client.fetch_logs("does-not-exist", 100).await;
        assert!(result.is_err());
    }
}
