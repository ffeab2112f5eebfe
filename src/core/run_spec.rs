//! Container run request built from the run-container form
//!
//! The form's env and port fields use a flat comma-separated micro-syntax
//! with no escaping: `KEY=value,FOO=bar` and `HOST:CONTAINER,HOST:CONTAINER`.
//! Malformed entries are silently skipped, never rejected.

/// A single host-to-container port binding, TCP only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub host_port: String,
    pub container_port: String,
}

/// Everything needed to pull, create, and start a container
#[derive(Debug, Clone, Default)]
pub struct RunSpec {
    pub image: String,
    /// Whitespace-split command, empty for the image default
    pub command: Vec<String>,
    /// Verbatim `KEY=value` entries
    pub env: Vec<String>,
    pub ports: Vec<PortSpec>,
    pub memory_mb: Option<i64>,
    pub cpu_shares: Option<i64>,
    pub privileged: bool,
}

impl RunSpec {
    /// Build a spec from the raw form field values
    pub fn from_fields(
        image: &str,
        command: &str,
        env: &str,
        ports: &str,
        memory_mb: &str,
        cpu_shares: &str,
        privileged: &str,
    ) -> Self {
        Self {
            image: image.trim().to_string(),
            command: command.split_whitespace().map(str::to_string).collect(),
            env: parse_env_spec(env),
            ports: parse_port_spec(ports),
            memory_mb: parse_positive_int(memory_mb),
            cpu_shares: parse_positive_int(cpu_shares),
            privileged: parse_bool(privileged),
        }
    }

    /// Quick-run spec for a disposable alpine container
    pub fn alpine() -> Self {
        Self {
            image: "alpine".to_string(),
            command: vec![
                "echo".to_string(),
                "Hello from Alpine!".to_string(),
            ],
            ..Default::default()
        }
    }
}

/// Parse comma-separated `KEY=value` entries.
///
/// Entries without a `=` are skipped; kept entries are passed through
/// verbatim, so interior `=` in the value position survives.
pub fn parse_env_spec(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty() && e.contains('='))
        .map(str::to_string)
        .collect()
}

/// Parse comma-separated `HOST:CONTAINER` pairs.
///
/// An entry must split into exactly two non-empty parts; anything else,
/// including extra colons, is skipped without an error.
pub fn parse_port_spec(spec: &str) -> Vec<PortSpec> {
    spec.split(',')
        .filter_map(|pair| {
            let parts: Vec<&str> = pair.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [host, container] if !host.is_empty() && !container.is_empty() => {
                    Some(PortSpec {
                        host_port: host.to_string(),
                        container_port: container.to_string(),
                    })
                }
                _ => None,
            }
        })
        .collect()
}

fn parse_positive_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "y" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_env_spec_two_entries() {
        assert_eq!(
            parse_env_spec("KEY=value,FOO=bar"),
            vec!["KEY=value".to_string(), "FOO=bar".to_string()]
        );
    }

    #[test]
    fn test_env_spec_preserves_interior_equals() {
        assert_eq!(parse_env_spec("A=b=c"), vec!["A=b=c".to_string()]);
    }

    #[test]
    fn test_env_spec_skips_malformed_entries() {
        assert_eq!(parse_env_spec("KEY=value,plain,"), vec!["KEY=value".to_string()]);
        assert!(parse_env_spec("").is_empty());
    }

    #[test]
    fn test_port_spec_valid_pair() {
        assert_eq!(
            parse_port_spec("8080:80"),
            vec![PortSpec {
                host_port: "8080".to_string(),
                container_port: "80".to_string(),
            }]
        );
    }

    #[test]
    fn test_port_spec_no_colon_yields_empty_set() {
        assert!(parse_port_spec("abc").is_empty());
    }

    #[test]
    fn test_port_spec_skips_partial_entries() {
        let specs = parse_port_spec("8080:80, :90, 9090:, 3000:3000");
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].host_port, "3000");
    }

    #[test]
    fn test_port_spec_skips_extra_colons() {
        assert!(parse_port_spec("8080:80:90").is_empty());

        let specs = parse_port_spec("8080:80:90,3000:3000");
        assert_eq!(
            specs,
            vec![PortSpec {
                host_port: "3000".to_string(),
                container_port: "3000".to_string(),
            }]
        );
    }

    #[test]
    fn test_numeric_fields_silently_ignored_when_malformed() {
        let spec = RunSpec::from_fields("alpine", "echo hi", "", "", "abc", "-5", "no");
        assert_eq!(spec.memory_mb, None);
        assert_eq!(spec.cpu_shares, None);
        assert!(!spec.privileged);
    }

    #[test]
    fn test_from_fields_full() {
        let spec = RunSpec::from_fields(
            " nginx:latest ",
            "nginx -g daemon off;",
            "KEY=value,FOO=bar",
            "8080:80",
            "256",
            "1024",
            "yes",
        );
        assert_eq!(spec.image, "nginx:latest");
        assert_eq!(spec.command.len(), 4);
        assert_eq!(spec.env.len(), 2);
        assert_eq!(spec.ports.len(), 1);
        assert_eq!(spec.memory_mb, Some(256));
        assert_eq!(spec.cpu_shares, Some(1024));
        assert!(spec.privileged);
    }

    #[test]
    fn test_alpine_quick_run() {
        let spec = RunSpec::alpine();
        assert_eq!(spec.image, "alpine");
        assert_eq!(spec.command[0], "echo");
        assert!(spec.ports.is_empty());
    }
}
