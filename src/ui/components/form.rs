//! Modal creation-form rendering

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{FormField, ResourceForm};
use crate::ui::components::centered_rect;

pub fn render(f: &mut Frame, area: Rect, form: &ResourceForm) {
    let height = (form.fields.len() as u16 * 3 + 2).min(area.height);
    let popup = centered_rect(60, 100, area);
    let popup = Rect {
        height,
        y: popup.y + popup.height.saturating_sub(height) / 2,
        ..popup
    };
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", form.kind.title()))
        .title_bottom(" Tab next | Enter submit | Esc cancel ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

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
}

pub fn render_field(f: &mut Frame, area: Rect, field: &FormField, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if field.value.is_empty() {
        Line::from(Span::styled(
            field.placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    } else if focused {
        Line::from(vec![
            Span::raw(field.value.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        Line::from(field.value.as_str())
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(field.label.as_str()),
    );
    f.render_widget(paragraph, area);
}
