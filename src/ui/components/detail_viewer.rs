//! Container inspect overlay

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::docker::ContainerDetails;
use crate::state::DetailViewState;
use crate::ui::components::centered_rect;

pub fn render(f: &mut Frame, area: Rect, view: &DetailViewState) {
    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Inspect: {} ", view.container_name))
        .title_bottom(" j/k scroll | Esc close ");

    if let Some(err) = &view.error {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )))
        .block(block);
        f.render_widget(paragraph, popup);
        return;
    }

    let Some(details) = &view.details else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Inspecting...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(paragraph, popup);
        return;
    };

    let lines = detail_lines(details);
    let visible: Vec<Line> = lines.into_iter().skip(view.scroll).collect();

    f.render_widget(Paragraph::new(visible).block(block), popup);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn detail_lines(details: &ContainerDetails) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("ID:      {}", details.id)),
        Line::from(format!("Name:    {}", details.name)),
        Line::from(format!("Image:   {}", details.image)),
        Line::from(format!("Command: {}", details.command)),
        Line::from(format!("Status:  {}", details.status)),
        Line::from(format!("Created: {}", details.created)),
    ];

    for (title, items) in [
        ("Ports", &details.ports),
        ("Mounts", &details.mounts),
        ("Env", &details.env),
        ("Networks", &details.networks),
    ] {
        lines.push(Line::default());
        lines.push(heading(title));
        if items.is_empty() {
            lines.push(Line::from("  (none)"));
        } else {
            for item in items {
                lines.push(Line::from(format!("  {}", item)));
            }
        }
    }

    lines
}

/// Total line count, for clamping scroll
pub fn line_count(details: &ContainerDetails) -> usize {
    detail_lines(details).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_lines_include_all_sections() {
        let details = ContainerDetails {
            id: "abc".to_string(),
            name: "web".to_string(),
            env: vec!["PATH=/usr/bin".to_string()],
            ..Default::default()
        };
        let lines = detail_lines(&details);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("Name:    web")));
        assert!(text.iter().any(|l| l.as_str() == "Env"));
        assert!(text.iter().any(|l| l.contains("PATH=/usr/bin")));
        assert!(text.iter().any(|l| l.as_str() == "Networks"));
    }
}
