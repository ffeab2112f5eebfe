//! Key routing and frame composition

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::core::{
    ConnectionInfo, ContainerSummary, ImageSummary, NetworkCreateSpec, NetworkSummary,
    NotificationLevel, RunSpec, Tab, UiAction, VolumeSummary,
};
use crate::state::{
    AppState, DetailViewState, FormEvent, FormKind, LogViewState, Overlay, ResourceForm,
    SettingsForm, StatsViewState,
};
use crate::ui::components::{
    detail_viewer, form, log_viewer, settings_panel, stats_viewer, ResourceList, SummaryLine,
};

/// The interactive shell: four resource lists, a settings tab, and whatever
/// overlay or form is currently on top.
pub struct UiApp {
    pub state: AppState,
    pub containers: ResourceList<ContainerSummary>,
    pub images: ResourceList<ImageSummary>,
    pub volumes: ResourceList<VolumeSummary>,
    pub networks: ResourceList<NetworkSummary>,
    pending_action: Option<UiAction>,
    pub should_quit: bool,
}

impl UiApp {
    pub fn new(connection_info: ConnectionInfo, settings: SettingsForm) -> Self {
        Self {
            state: AppState::new(connection_info, settings),
            containers: ResourceList::new("Containers"),
            images: ResourceList::new("Images"),
            volumes: ResourceList::new("Volumes"),
            networks: ResourceList::new("Networks"),
            pending_action: None,
            should_quit: false,
        }
    }

    /// Take the action queued by the last key event, if any
    pub fn take_action(&mut self) -> Option<UiAction> {
        self.pending_action.take()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.state.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        if self.state.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        if self.state.current_tab == Tab::Settings {
            self.handle_settings_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::all().iter().find(|t| t.shortcut() == c) {
                    self.state.current_tab = *tab;
                }
            }
            KeyCode::Left => self.switch_tab(-1),
            KeyCode::Right => self.switch_tab(1),
            KeyCode::Down | KeyCode::Char('j') => self.current_list_next(),
            KeyCode::Up | KeyCode::Char('k') => self.current_list_previous(),
            KeyCode::Char('r') => {
                self.pending_action = Some(UiAction::Refresh(self.state.current_tab));
            }
            KeyCode::Char('R') => self.pending_action = Some(UiAction::RefreshAll),
            _ => self.handle_tab_key(key),
        }
    }

    fn switch_tab(&mut self, delta: isize) {
        let tabs = Tab::all();
        let current = tabs
            .iter()
            .position(|t| *t == self.state.current_tab)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(tabs.len() as isize) as usize;
        self.state.current_tab = tabs[next];
    }

    fn current_list_next(&mut self) {
        match self.state.current_tab {
            Tab::Containers => self.containers.next(),
            Tab::Images => self.images.next(),
            Tab::Volumes => self.volumes.next(),
            Tab::Networks => self.networks.next(),
            Tab::Settings => {}
        }
    }

    fn current_list_previous(&mut self) {
        match self.state.current_tab {
            Tab::Containers => self.containers.previous(),
            Tab::Images => self.images.previous(),
            Tab::Volumes => self.volumes.previous(),
            Tab::Networks => self.networks.previous(),
            Tab::Settings => {}
        }
    }

    /// Per-tab action keys. A key with no selected resource is a no-op,
    /// and action keys are swallowed while an operation is in flight.
    fn handle_tab_key(&mut self, key: KeyEvent) {
        if self.state.loading {
            return;
        }
        match self.state.current_tab {
            Tab::Containers => self.handle_container_key(key),
            Tab::Images => match key.code {
                KeyCode::Char('p') => self.state.form = Some(ResourceForm::pull_image()),
                KeyCode::Char('d') => {
                    if let Some(image) = self.images.selected() {
                        self.pending_action = Some(UiAction::RemoveImage(image.id.clone()));
                    }
                }
                _ => {}
            },
            Tab::Volumes => match key.code {
                KeyCode::Char('c') => self.state.form = Some(ResourceForm::create_volume()),
                KeyCode::Char('d') => {
                    if let Some(volume) = self.volumes.selected() {
                        self.pending_action = Some(UiAction::RemoveVolume(volume.name.clone()));
                    }
                }
                _ => {}
            },
            Tab::Networks => match key.code {
                KeyCode::Char('c') => self.state.form = Some(ResourceForm::create_network()),
                KeyCode::Char('d') => {
                    if let Some(network) = self.networks.selected() {
                        self.pending_action = Some(UiAction::RemoveNetwork(network.id.clone()));
                    }
                }
                _ => {}
            },
            Tab::Settings => {}
        }
    }

    fn handle_container_key(&mut self, key: KeyEvent) {
        let selected = self
            .containers
            .selected()
            .map(|c| (c.id.clone(), c.names.first().cloned().unwrap_or_default()));

        match key.code {
            KeyCode::Char('n') => {
                self.state.form = Some(ResourceForm::run_container());
                return;
            }
            KeyCode::Char('A') => {
                self.pending_action = Some(UiAction::RunContainer(RunSpec::alpine()));
                return;
            }
            _ => {}
        }

        let Some((id, name)) = selected else { return };

        match key.code {
            KeyCode::Char('s') => self.pending_action = Some(UiAction::StartContainer(id)),
            KeyCode::Char('x') => self.pending_action = Some(UiAction::StopContainer(id)),
            KeyCode::Char('d') => self.pending_action = Some(UiAction::RemoveContainer(id)),
            KeyCode::Char('l') => {
                self.state.overlay = Some(Overlay::Logs(LogViewState {
                    container_name: name.clone(),
                    ..Default::default()
                }));
                self.pending_action = Some(UiAction::ShowLogs { id, name });
            }
            KeyCode::Char('t') => {
                self.state.overlay = Some(Overlay::Stats(StatsViewState {
                    container_name: name.clone(),
                    ..Default::default()
                }));
                self.pending_action = Some(UiAction::ShowStats { id, name });
            }
            KeyCode::Char('i') => {
                self.state.overlay = Some(Overlay::Inspect(DetailViewState {
                    container_name: name.clone(),
                    ..Default::default()
                }));
                self.pending_action = Some(UiAction::InspectContainer { id, name });
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.state.overlay = None,
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(overlay) = &mut self.state.overlay {
                    match overlay {
                        Overlay::Logs(view) => {
                            view.scroll = (view.scroll + 1).min(log_viewer::max_scroll(view));
                        }
                        Overlay::Inspect(view) => {
                            let max = view
                                .details
                                .as_ref()
                                .map(detail_viewer::line_count)
                                .unwrap_or(0)
                                .saturating_sub(1);
                            view.scroll = (view.scroll + 1).min(max);
                        }
                        Overlay::Stats(_) => {}
                    }
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(overlay) = &mut self.state.overlay {
                    match overlay {
                        Overlay::Logs(view) => view.scroll = view.scroll.saturating_sub(1),
                        Overlay::Inspect(view) => view.scroll = view.scroll.saturating_sub(1),
                        Overlay::Stats(_) => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = &mut self.state.form else { return };

        match form.handle_key(key) {
            FormEvent::None => {}
            FormEvent::Cancel => self.state.form = None,
            FormEvent::Submit => {
                if self.state.loading {
                    self.state.add_notification(
                        NotificationLevel::Warning,
                        "Another operation is in progress",
                    );
                    return;
                }
                if let Some(form) = self.state.form.take() {
                    self.submit_form(form);
                }
            }
        }
    }

    fn submit_form(&mut self, form: ResourceForm) {
        match form.kind {
            FormKind::PullImage => {
                let image = form.value("Image").to_string();
                if image.is_empty() {
                    self.reject_form(form, "Image is required");
                    return;
                }
                self.pending_action = Some(UiAction::PullImage(image));
            }
            FormKind::CreateVolume => {
                let name = form.value("Name").to_string();
                if name.is_empty() {
                    self.reject_form(form, "Name is required");
                    return;
                }
                self.pending_action = Some(UiAction::CreateVolume(name));
            }
            FormKind::CreateNetwork => {
                let name = form.value("Name").to_string();
                if name.is_empty() {
                    self.reject_form(form, "Name is required");
                    return;
                }
                let driver = match form.value("Driver") {
                    "" => "bridge".to_string(),
                    d => d.to_string(),
                };
                let parent = form.value("Macvlan Parent");
                self.pending_action = Some(UiAction::CreateNetwork(NetworkCreateSpec {
                    name,
                    driver,
                    macvlan_parent: (!parent.is_empty()).then(|| parent.to_string()),
                }));
            }
            FormKind::RunContainer => {
                let spec = RunSpec::from_fields(
                    form.value("Image"),
                    form.value("Command"),
                    form.value("Env"),
                    form.value("Ports"),
                    form.value("Memory (MB)"),
                    form.value("CPU Shares"),
                    form.value("Privileged"),
                );
                if spec.image.is_empty() {
                    self.reject_form(form, "Image is required");
                    return;
                }
                self.pending_action = Some(UiAction::RunContainer(spec));
            }
        }
    }

    /// Put the form back and tell the user what was missing
    fn reject_form(&mut self, form: ResourceForm, message: &str) {
        self.state
            .add_notification(NotificationLevel::Warning, message);
        self.state.form = Some(form);
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.switch_tab(-1),
            KeyCode::Right => self.switch_tab(1),
            KeyCode::Esc => self.state.current_tab = Tab::Containers,
            _ => {
                if self.state.settings.handle_key(key) == FormEvent::Submit
                    && !self.state.loading
                {
                    let settings = self.state.settings.to_settings();
                    self.pending_action = Some(UiAction::ApplySettings(settings));
                }
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(2),
            ])
            .split(f.area());

        self.draw_header(f, sections[0]);
        self.draw_content(f, sections[1]);
        self.draw_footer(f, sections[2]);

        if let Some(form) = &self.state.form {
            form::render(f, sections[1], form);
        }

        if let Some(overlay) = &self.state.overlay {
            match overlay {
                Overlay::Logs(view) => log_viewer::render(f, f.area(), view),
                Overlay::Stats(view) => stats_viewer::render(f, f.area(), view),
                Overlay::Inspect(view) => detail_viewer::render(f, f.area(), view),
            }
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(24)])
            .split(area);

        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|t| Line::from(format!("{} [{}]", t.name(), t.shortcut())))
            .collect();
        let selected = Tab::all()
            .iter()
            .position(|t| *t == self.state.current_tab)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");
        f.render_widget(tabs, columns[0]);

        let (dot, color) = if self.state.docker_connected {
            ("● connected", Color::Green)
        } else {
            ("● disconnected", Color::Red)
        };
        let status = Paragraph::new(Line::from(vec![
            Span::styled(dot, Style::default().fg(color)),
            Span::raw(if self.state.loading { " …" } else { "" }),
        ]))
        .right_aligned();
        f.render_widget(status, columns[1]);
    }

    fn draw_content(&mut self, f: &mut Frame, area: Rect) {
        match self.state.current_tab {
            Tab::Containers => self.containers.render(f, area, true),
            Tab::Images => self.images.render(f, area, true),
            Tab::Volumes => self.volumes.render(f, area, true),
            Tab::Networks => self.networks.render(f, area, true),
            Tab::Settings => {
                settings_panel::render(
                    f,
                    area,
                    &self.state.settings,
                    &self.state.connection_info,
                );
            }
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let summary = self.selection_summary().unwrap_or_else(|| match self.state.current_tab {
            Tab::Containers => {
                "s start | x stop | d remove | l logs | t stats | i inspect | n run | A alpine"
                    .to_string()
            }
            Tab::Images => "p pull | d remove".to_string(),
            Tab::Volumes => "c create | d remove".to_string(),
            Tab::Networks => "c create | d remove".to_string(),
            Tab::Settings => "Tab next field | Enter apply | Esc back".to_string(),
        });

        let notification = self
            .state
            .last_notification()
            .map(|n| {
                let color = match n.level {
                    NotificationLevel::Info => Color::Gray,
                    NotificationLevel::Success => Color::Green,
                    NotificationLevel::Warning => Color::Yellow,
                    NotificationLevel::Error => Color::Red,
                };
                Line::from(Span::styled(
                    format!("[{}] {}", n.level, n.message),
                    Style::default().fg(color),
                ))
            })
            .unwrap_or_default();

        let footer = Paragraph::new(vec![
            Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
            notification,
        ]);
        f.render_widget(footer, area);
    }

    fn selection_summary(&self) -> Option<String> {
        match self.state.current_tab {
            Tab::Containers => self.containers.selected().map(SummaryLine::summary_line),
            Tab::Images => self.images.selected().map(SummaryLine::summary_line),
            Tab::Volumes => self.volumes.selected().map(SummaryLine::summary_line),
            Tab::Networks => self.networks.selected().map(SummaryLine::summary_line),
            Tab::Settings => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> UiApp {
        UiApp::new(
            ConnectionInfo::default(),
            SettingsForm::from_settings(&Default::default()),
        )
    }

    fn container(id: &str, name: &str) -> ContainerSummary {
        ContainerSummary {
            id: id.to_string(),
            short_id: id.chars().take(12).collect(),
            names: vec![name.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_tab_switching() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.state.current_tab, Tab::Volumes);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.state.current_tab, Tab::Networks);

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.state.current_tab, Tab::Images);
    }

    #[test]
    fn test_action_carries_stable_id() {
        let mut app = app();
        app.containers
            .update_items(vec![container("aaa", "web"), container("bbb", "db")]);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('x')));

        match app.take_action() {
            Some(UiAction::StopContainer(id)) => assert_eq!(id, "bbb"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_action_key_without_selection_is_noop() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.take_action().is_none());
    }

    #[test]
    fn test_action_keys_swallowed_while_loading() {
        let mut app = app();
        app.containers.update_items(vec![container("aaa", "web")]);
        app.state.loading = true;

        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.take_action().is_none());

        // Navigation stays live
        app.containers
            .update_items(vec![container("aaa", "web"), container("bbb", "db")]);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.containers.selected_key(), Some("bbb"));
    }

    #[test]
    fn test_logs_key_opens_overlay_and_queues_fetch() {
        let mut app = app();
        app.containers.update_items(vec![container("aaa", "web")]);
        app.handle_key(key(KeyCode::Char('l')));

        assert!(matches!(app.state.overlay, Some(Overlay::Logs(_))));
        assert!(matches!(app.take_action(), Some(UiAction::ShowLogs { .. })));

        // While the overlay is up, action keys are swallowed
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.take_action().is_none());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.state.overlay.is_none());
    }

    #[test]
    fn test_empty_form_submit_is_rejected() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.state.form.is_some());

        app.handle_key(key(KeyCode::Enter));
        assert!(app.take_action().is_none());
        assert!(app.state.form.is_some());
        assert_eq!(
            app.state.last_notification().unwrap().level,
            NotificationLevel::Warning
        );
    }

    #[test]
    fn test_volume_form_submits_name() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Char('c')));
        for c in "data".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        match app.take_action() {
            Some(UiAction::CreateVolume(name)) => assert_eq!(name, "data"),
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(app.state.form.is_none());
    }

    #[test]
    fn test_settings_tab_digits_edit_instead_of_switching() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.state.current_tab, Tab::Settings);

        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.state.current_tab, Tab::Settings);
        assert!(app.state.settings.fields[0].value.ends_with('1'));
    }

    #[test]
    fn test_settings_enter_applies() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Enter));

        assert!(matches!(
            app.take_action(),
            Some(UiAction::ApplySettings(_))
        ));
    }

    #[test]
    fn test_quick_alpine_run() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('A')));
        match app.take_action() {
            Some(UiAction::RunContainer(spec)) => assert_eq!(spec.image, "alpine"),
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
