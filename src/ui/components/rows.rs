//! Table rows and status-bar summaries for each resource kind

use ratatui::layout::Constraint;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Row};

use crate::core::{
    ContainerState, ContainerSummary, ImageSummary, NetworkSummary, VolumeSummary,
};
use crate::docker::format_bytes;
use crate::ui::components::resource_list::ResourceRow;

fn state_color(state: ContainerState) -> Color {
    match state {
        ContainerState::Running => Color::Green,
        ContainerState::Paused | ContainerState::Restarting | ContainerState::Created => {
            Color::Yellow
        }
        ContainerState::Exited | ContainerState::Dead | ContainerState::Removing => Color::Red,
        ContainerState::Unknown => Color::Gray,
    }
}

impl ResourceRow for ContainerSummary {
    const HEADER: &'static [&'static str] = &["ID", "Name", "Image", "State", "Status"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Length(12),
        Constraint::Percentage(20),
        Constraint::Percentage(30),
        Constraint::Length(10),
        Constraint::Percentage(25),
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn row(&self) -> Row<'_> {
        Row::new(vec![
            Cell::from(self.short_id.as_str()),
            Cell::from(self.names.first().map(String::as_str).unwrap_or("-")),
            Cell::from(self.image.as_str()),
            Cell::from(self.state.to_string())
                .style(Style::default().fg(state_color(self.state))),
            Cell::from(self.status.as_str()),
        ])
    }
}

impl ResourceRow for ImageSummary {
    const HEADER: &'static [&'static str] = &["ID", "Tags", "Size", "Created"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Length(12),
        Constraint::Percentage(50),
        Constraint::Length(10),
        Constraint::Percentage(25),
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn row(&self) -> Row<'_> {
        let tags = if self.dangling {
            "<none>".to_string()
        } else {
            self.repo_tags.join(", ")
        };
        Row::new(vec![
            Cell::from(self.short_id.as_str()),
            Cell::from(tags),
            Cell::from(format_bytes(self.size.max(0) as u64)),
            Cell::from(self.created.format("%Y-%m-%d %H:%M").to_string()),
        ])
    }
}

impl ResourceRow for VolumeSummary {
    const HEADER: &'static [&'static str] = &["Name", "Driver", "Scope", "Mountpoint"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Percentage(30),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Percentage(50),
    ];

    fn key(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Row<'_> {
        Row::new(vec![
            Cell::from(self.name.as_str()),
            Cell::from(self.driver.as_str()),
            Cell::from(self.scope.to_string()),
            Cell::from(self.mountpoint.as_str()),
        ])
    }
}

impl ResourceRow for NetworkSummary {
    const HEADER: &'static [&'static str] = &["ID", "Name", "Driver", "Scope"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Length(12),
        Constraint::Percentage(40),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn row(&self) -> Row<'_> {
        Row::new(vec![
            Cell::from(self.short_id.as_str()),
            Cell::from(self.name.as_str()),
            Cell::from(self.driver.as_str()),
            Cell::from(self.scope.to_string()),
        ])
    }
}

/// One-line status-bar summaries, one per resource kind
pub trait SummaryLine {
    fn summary_line(&self) -> String;
}

impl SummaryLine for ContainerSummary {
    fn summary_line(&self) -> String {
        format!(
            "ID:{} | Image:{} | Status:{}",
            self.short_id, self.image, self.status
        )
    }
}

impl SummaryLine for ImageSummary {
    fn summary_line(&self) -> String {
        format!(
            "ID:{} | Tags:{:?} | Size:{}",
            self.short_id,
            self.repo_tags,
            format_bytes(self.size.max(0) as u64)
        )
    }
}

impl SummaryLine for VolumeSummary {
    fn summary_line(&self) -> String {
        format!(
            "Name:{} | Driver:{} | Mountpoint:{}",
            self.name, self.driver, self.mountpoint
        )
    }
}

impl SummaryLine for NetworkSummary {
    fn summary_line(&self) -> String {
        format!(
            "Name:{} | ID:{} | Scope:{} | Driver:{}",
            self.name, self.short_id, self.scope, self.driver
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VolumeScope;

    #[test]
    fn test_container_summary_line() {
        let container = ContainerSummary {
            short_id: "abc123def456".to_string(),
            image: "nginx:latest".to_string(),
            status: "Up 2 hours".to_string(),
            ..Default::default()
        };
        assert_eq!(
            container.summary_line(),
            "ID:abc123def456 | Image:nginx:latest | Status:Up 2 hours"
        );
    }

    #[test]
    fn test_volume_summary_line() {
        let volume = VolumeSummary {
            name: "data".to_string(),
            driver: "local".to_string(),
            mountpoint: "/var/lib/docker/volumes/data/_data".to_string(),
            created_at: chrono::Utc::now(),
            scope: VolumeScope::Local,
        };
        assert_eq!(
            volume.summary_line(),
            "Name:data | Driver:local | Mountpoint:/var/lib/docker/volumes/data/_data"
        );
    }

    #[test]
    fn test_network_summary_line() {
        let network = NetworkSummary {
            id: "0123456789abcdef".to_string(),
            short_id: "0123456789ab".to_string(),
            name: "bridge".to_string(),
            driver: "bridge".to_string(),
            scope: crate::core::NetworkScope::Local,
            created: chrono::Utc::now(),
            internal: false,
            attachable: false,
        };
        assert_eq!(
            network.summary_line(),
            "Name:bridge | ID:0123456789ab | Scope:local | Driver:bridge"
        );
    }
}
