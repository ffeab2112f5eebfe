//! Settings tab: connection parameters and daemon info

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::ConnectionInfo;
use crate::state::SettingsForm;
use crate::ui::components::form::render_field;

pub fn render(f: &mut Frame, area: Rect, form: &SettingsForm, info: &ConnectionInfo) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form.fields.len() as u16 * 3 + 2),
            Constraint::Min(4),
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Connection ")
        .title_bottom(" Tab next field | Enter apply ");
    let inner = block.inner(halves[0]);
    f.render_widget(block, halves[0]);

    let constraints: Vec<Constraint> =
        form.fields.iter().map(|_| Constraint::Length(3)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        if i >= rows.len() {
            break;
        }
        render_field(f, rows[i], field, i == form.focused);
    }

    let daemon = Paragraph::new(vec![
        Line::from(format!("Host:        {}", info.host)),
        Line::from(format!("Version:     {}", info.version)),
        Line::from(format!("API version: {}", info.api_version)),
        Line::from(format!("Platform:    {}/{}", info.os, info.arch)),
    ])
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title(" Daemon "));
    f.render_widget(daemon, halves[1]);
}
