//! Generic selectable table over one resource kind

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table, TableState};
use ratatui::Frame;

/// A resource that can be rendered as one table row.
///
/// `key` must be stable across refreshes (engine ID or name) so selection can
/// survive list reordering.
pub trait ResourceRow {
    const HEADER: &'static [&'static str];
    const WIDTHS: &'static [Constraint];

    fn key(&self) -> &str;
    fn row(&self) -> Row<'_>;
}

/// A list panel with identity-preserving selection
pub struct ResourceList<T: ResourceRow> {
    items: Vec<T>,
    state: TableState,
    title: String,
}

impl<T: ResourceRow> ResourceList<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            state: TableState::default(),
            title: title.into(),
        }
    }

    /// Replace the items with a fresh snapshot.
    ///
    /// The previously selected key is re-found in the new snapshot; if it is
    /// gone the selection falls back to the first item.
    pub fn update_items(&mut self, items: Vec<T>) {
        let previous_key = self.selected_key().map(str::to_string);

        self.items = items;

        if self.items.is_empty() {
            self.state.select(None);
            return;
        }

        let index = previous_key
            .and_then(|key| self.items.iter().position(|item| item.key() == key))
            .unwrap_or(0);
        self.state.select(Some(index));
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected().map(|item| item.key())
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let table = build_table(&self.items, &self.title, focused);
        f.render_stateful_widget(table, area, &mut self.state);
    }
}

fn build_table<'a, T: ResourceRow>(items: &'a [T], title: &str, focused: bool) -> Table<'a> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Row::new(T::HEADER.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = items.iter().map(|item| item.row());

    Table::new(rows, T::WIDTHS.to_vec())
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ({}) ", title, items.len())),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: String,
        label: String,
    }

    impl Item {
        fn new(id: &str, label: &str) -> Self {
            Self {
                id: id.to_string(),
                label: label.to_string(),
            }
        }
    }

    impl ResourceRow for Item {
        const HEADER: &'static [&'static str] = &["ID", "Label"];
        const WIDTHS: &'static [Constraint] =
            &[Constraint::Length(12), Constraint::Percentage(100)];

        fn key(&self) -> &str {
            &self.id
        }

        fn row(&self) -> Row<'_> {
            Row::new(vec![self.id.clone(), self.label.clone()])
        }
    }

    #[test]
    fn test_selection_follows_identity_across_refresh() {
        let mut list = ResourceList::new("Items");
        list.update_items(vec![Item::new("a", "one"), Item::new("b", "two")]);
        list.next();
        assert_eq!(list.selected_key(), Some("b"));

        // Refresh reorders the snapshot; selection stays on the same item
        list.update_items(vec![
            Item::new("b", "two"),
            Item::new("c", "three"),
            Item::new("a", "one"),
        ]);
        assert_eq!(list.selected_key(), Some("b"));
    }

    #[test]
    fn test_selection_falls_back_when_item_disappears() {
        let mut list = ResourceList::new("Items");
        list.update_items(vec![Item::new("a", "one"), Item::new("b", "two")]);
        list.next();
        assert_eq!(list.selected_key(), Some("b"));

        list.update_items(vec![Item::new("a", "one")]);
        assert_eq!(list.selected_key(), Some("a"));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = ResourceList::new("Items");
        list.update_items(vec![Item::new("a", "one"), Item::new("b", "two")]);
        assert_eq!(list.selected_key(), Some("a"));

        list.previous();
        assert_eq!(list.selected_key(), Some("b"));
        list.next();
        assert_eq!(list.selected_key(), Some("a"));
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list: ResourceList<Item> = ResourceList::new("Items");
        list.next();
        assert_eq!(list.selected_key(), None);

        list.update_items(vec![Item::new("a", "one")]);
        list.update_items(Vec::new());
        assert_eq!(list.selected_key(), None);
    }
}
