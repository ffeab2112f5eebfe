//! One-shot stats overlay

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;

use crate::docker::format_bytes;
use crate::state::StatsViewState;
use crate::ui::components::centered_rect;

pub fn render(f: &mut Frame, area: Rect, view: &StatsViewState) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Stats: {} ", view.container_name))
        .title_bottom(" Esc close ");

    if let Some(err) = &view.error {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )))
        .block(block);
        f.render_widget(paragraph, popup);
        return;
    }

    let Some(stats) = &view.stats else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Collecting stats...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(paragraph, popup);
        return;
    };

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .split(inner);

    let cpu = Gauge::default()
        .block(Block::default().title("CPU"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((stats.cpu_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", stats.cpu_percent));
    f.render_widget(cpu, sections[0]);

    let mem_label = format!(
        "{:.1}% ({} / {})",
        stats.memory_percent,
        format_bytes(stats.memory_usage),
        format_bytes(stats.memory_limit)
    );
    let mem = Gauge::default()
        .block(Block::default().title("Memory"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio((stats.memory_percent / 100.0).clamp(0.0, 1.0))
        .label(mem_label);
    f.render_widget(mem, sections[1]);

    let detail = Paragraph::new(vec![
        Line::from(format!(
            "Network: {} rx / {} tx",
            format_bytes(stats.network_rx),
            format_bytes(stats.network_tx)
        )),
        Line::from(format!(
            "Block IO: {} read / {} write",
            format_bytes(stats.block_read),
            format_bytes(stats.block_write)
        )),
        Line::from(format!("PIDs: {}", stats.pids)),
    ]);
    f.render_widget(detail, sections[2]);
}
