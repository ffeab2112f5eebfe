//! Log snapshot overlay

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::LogViewState;
use crate::ui::components::centered_rect;

pub fn render(f: &mut Frame, area: Rect, view: &LogViewState) {
    let popup = centered_rect(90, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Logs: {} ", view.container_name))
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

    let lines: Vec<Line> = view
        .entries
        .iter()
        .skip(view.scroll)
        .map(|entry| {
            let style = if entry.is_stderr {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            match entry.timestamp {
                Some(ts) => Line::from(vec![
                    Span::styled(
                        format!("{} ", ts.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.message.as_str(), style),
                ]),
                None => Line::from(Span::styled(entry.message.as_str(), style)),
            }
        })
        .collect();

    let paragraph = if lines.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No log output",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block)
    } else {
        Paragraph::new(lines).block(block)
    };

    f.render_widget(paragraph, popup);
}

/// Clamp a scroll request to the entry count
pub fn max_scroll(view: &LogViewState) -> usize {
    view.entries.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::LogEntry;

    #[test]
    fn test_max_scroll() {
        let mut view = LogViewState::default();
        assert_eq!(max_scroll(&view), 0);

        view.entries = vec![
            LogEntry {
                timestamp: None,
                message: "one".to_string(),
                is_stderr: false,
            },
            LogEntry {
                timestamp: None,
                message: "two".to_string(),
                is_stderr: false,
            },
        ];
        assert_eq!(max_scroll(&view), 1);
    }
}
