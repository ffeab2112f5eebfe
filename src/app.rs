//! Event loop: terminal lifecycle, worker-task dispatch, outcome folding

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::{event, execute, terminal};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::config::Config;
use crate::core::{
    ContainerSummary, DockerError, ImageSummary, NetworkSummary, NotificationLevel, Tab,
    UiAction, UiError, VolumeSummary,
};
use crate::docker::{ContainerDetails, DockerClient, LogEntry, StatsEntry};
use crate::state::{Overlay, SettingsForm};
use crate::ui::UiApp;

/// Result of a worker task, folded back into UI state on the event loop
enum TaskOutcome {
    Containers(crate::core::Result<Vec<ContainerSummary>>),
    Images(crate::core::Result<Vec<ImageSummary>>),
    Volumes(crate::core::Result<Vec<VolumeSummary>>),
    Networks(crate::core::Result<Vec<NetworkSummary>>),
    /// A lifecycle or creation call finished; refresh `tab` on success
    Action {
        tab: Tab,
        label: String,
        result: crate::core::Result<()>,
    },
    Logs(crate::core::Result<Vec<LogEntry>>),
    Stats(crate::core::Result<StatsEntry>),
    Details(crate::core::Result<ContainerDetails>),
    /// A replacement client built from the Settings tab
    Client(crate::core::Result<DockerClient>),
}

pub struct App {
    config: Config,
    client: DockerClient,
    ui: UiApp,
    tx: mpsc::UnboundedSender<TaskOutcome>,
    rx: mpsc::UnboundedReceiver<TaskOutcome>,
}

impl App {
    /// Build the first client and the UI shell.
    ///
    /// A failed first connection is fatal; there is nothing useful to show
    /// without a daemon.
    pub async fn new(config: Config) -> Result<Self> {
        let settings = config.docker.connection_settings();

        let client = DockerClient::from_settings(&settings)
            .await
            .context("Failed to connect to Docker daemon")?;

        let ui = UiApp::new(
            client.connection_info().clone(),
            SettingsForm::from_settings(&settings),
        );

        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            ui,
            tx,
            rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        self.dispatch(UiAction::RefreshAll);

        let result = self.event_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(std::time::Duration::from_millis(250));

        loop {
            terminal.draw(|f| self.ui.draw(f))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.ui.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            error!("Terminal event error: {}", e);
                        }
                        None => break,
                    }
                }
                Some(outcome) = self.rx.recv() => {
                    self.apply_outcome(outcome);
                    // Fold everything already queued before redrawing
                    while let Ok(outcome) = self.rx.try_recv() {
                        self.apply_outcome(outcome);
                    }
                }
                _ = ticker.tick() => {}
            }

            if let Some(action) = self.ui.take_action() {
                self.dispatch(action);
            }

            if self.ui.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Spawn a worker task for a UI action.
    ///
    /// The task takes its own client clone, so a later settings swap never
    /// affects a call already in flight.
    fn dispatch(&mut self, action: UiAction) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.ui.state.loading = true;

        match action {
            UiAction::Refresh(tab) => self.dispatch_refresh(tab),
            UiAction::RefreshAll => {
                for tab in [Tab::Containers, Tab::Images, Tab::Volumes, Tab::Networks] {
                    self.dispatch_refresh(tab);
                }
            }
            UiAction::StartContainer(id) => {
                tokio::spawn(async move {
                    let result = client.start_container(&id).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Containers,
                        label: "Container started".to_string(),
                        result,
                    });
                });
            }
            UiAction::StopContainer(id) => {
                let timeout = self.config.general.stop_timeout_secs;
                tokio::spawn(async move {
                    let result = client.stop_container(&id, timeout).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Containers,
                        label: "Container stopped".to_string(),
                        result,
                    });
                });
            }
            UiAction::RemoveContainer(id) => {
                tokio::spawn(async move {
                    let result = client.remove_container(&id, true).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Containers,
                        label: "Container removed".to_string(),
                        result,
                    });
                });
            }
            UiAction::RunContainer(spec) => {
                tokio::spawn(async move {
                    let result = client.run_container(&spec).await.map(|_| ());
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Containers,
                        label: format!("Container running from {}", spec.image),
                        result,
                    });
                });
            }
            UiAction::ShowLogs { id, .. } => {
                let tail = self.config.general.default_log_tail;
                tokio::spawn(async move {
                    let result = client.fetch_logs(&id, tail).await;
                    let _ = tx.send(TaskOutcome::Logs(result));
                });
            }
            UiAction::ShowStats { id, .. } => {
                tokio::spawn(async move {
                    let result = client.fetch_stats(&id).await;
                    let _ = tx.send(TaskOutcome::Stats(result));
                });
            }
            UiAction::InspectContainer { id, .. } => {
                tokio::spawn(async move {
                    let result = client.inspect_container(&id).await;
                    let _ = tx.send(TaskOutcome::Details(result));
                });
            }
            UiAction::PullImage(reference) => {
                tokio::spawn(async move {
                    let result = client.pull_image(&reference).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Images,
                        label: format!("Pulled {}", reference),
                        result,
                    });
                });
            }
            UiAction::RemoveImage(id) => {
                tokio::spawn(async move {
                    let result = client.remove_image(&id, true).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Images,
                        label: "Image removed".to_string(),
                        result,
                    });
                });
            }
            UiAction::CreateVolume(name) => {
                tokio::spawn(async move {
                    let result = client.create_volume(&name).await.map(|_| ());
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Volumes,
                        label: format!("Volume {} created", name),
                        result,
                    });
                });
            }
            UiAction::RemoveVolume(name) => {
                tokio::spawn(async move {
                    let result = client.remove_volume(&name, true).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Volumes,
                        label: "Volume removed".to_string(),
                        result,
                    });
                });
            }
            UiAction::CreateNetwork(spec) => {
                tokio::spawn(async move {
                    let result = client.create_network(&spec).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Networks,
                        label: format!("Network {} created", spec.name),
                        result,
                    });
                });
            }
            UiAction::RemoveNetwork(id) => {
                tokio::spawn(async move {
                    let result = client.remove_network(&id).await;
                    let _ = tx.send(TaskOutcome::Action {
                        tab: Tab::Networks,
                        label: "Network removed".to_string(),
                        result,
                    });
                });
            }
            UiAction::ApplySettings(settings) => {
                tokio::spawn(async move {
                    let result = DockerClient::from_settings(&settings).await;
                    let _ = tx.send(TaskOutcome::Client(result));
                });
            }
        }
    }

    fn dispatch_refresh(&self, tab: Tab) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        match tab {
            Tab::Containers => {
                tokio::spawn(async move {
                    let result = client.list_containers(true).await;
                    let _ = tx.send(TaskOutcome::Containers(result));
                });
            }
            Tab::Images => {
                tokio::spawn(async move {
                    let result = client.list_images().await;
                    let _ = tx.send(TaskOutcome::Images(result));
                });
            }
            Tab::Volumes => {
                tokio::spawn(async move {
                    let result = client.list_volumes().await;
                    let _ = tx.send(TaskOutcome::Volumes(result));
                });
            }
            Tab::Networks => {
                tokio::spawn(async move {
                    let result = client.list_networks().await;
                    let _ = tx.send(TaskOutcome::Networks(result));
                });
            }
            Tab::Settings => {}
        }
    }

    fn apply_outcome(&mut self, outcome: TaskOutcome) {
        self.ui.state.loading = false;

        match outcome {
            TaskOutcome::Containers(result) => match result {
                Ok(items) => {
                    self.ui.state.docker_connected = true;
                    self.ui.containers.update_items(items);
                }
                Err(e) => self.report_error(e),
            },
            TaskOutcome::Images(result) => match result {
                Ok(items) => {
                    self.ui.state.docker_connected = true;
                    self.ui.images.update_items(items);
                }
                Err(e) => self.report_error(e),
            },
            TaskOutcome::Volumes(result) => match result {
                Ok(items) => {
                    self.ui.state.docker_connected = true;
                    self.ui.volumes.update_items(items);
                }
                Err(e) => self.report_error(e),
            },
            TaskOutcome::Networks(result) => match result {
                Ok(items) => {
                    self.ui.state.docker_connected = true;
                    self.ui.networks.update_items(items);
                }
                Err(e) => self.report_error(e),
            },
            TaskOutcome::Action { tab, label, result } => match result {
                Ok(()) => {
                    self.ui
                        .state
                        .add_notification(NotificationLevel::Success, label);
                    self.dispatch_refresh(tab);
                }
                Err(e) => {
                    // A vanished resource also means the list is stale
                    let refresh = e.is_not_found();
                    self.report_error(e);
                    if refresh {
                        self.dispatch_refresh(tab);
                    }
                }
            },
            TaskOutcome::Logs(result) => {
                if let Some(Overlay::Logs(view)) = &mut self.ui.state.overlay {
                    match result {
                        Ok(entries) => view.entries = entries,
                        Err(e) => view.error = Some(e.user_message()),
                    }
                }
            }
            TaskOutcome::Stats(result) => {
                if let Some(Overlay::Stats(view)) = &mut self.ui.state.overlay {
                    match result {
                        Ok(stats) => view.stats = Some(stats),
                        Err(e) => view.error = Some(e.user_message()),
                    }
                }
            }
            TaskOutcome::Details(result) => {
                if let Some(Overlay::Inspect(view)) = &mut self.ui.state.overlay {
                    match result {
                        Ok(details) => view.details = Some(details),
                        Err(e) => view.error = Some(e.user_message()),
                    }
                }
            }
            TaskOutcome::Client(result) => match result {
                Ok(client) => {
                    info!(
                        "Swapped Docker client to {}",
                        client.connection_info().host
                    );
                    self.ui.state.connection_info = client.connection_info().clone();
                    self.ui.state.docker_connected = true;
                    self.client = client;
                    self.ui
                        .state
                        .add_notification(NotificationLevel::Success, "Settings applied");
                    self.dispatch(UiAction::RefreshAll);
                }
                // The previous client stays in place on failure
                Err(e) => self.report_error(e),
            },
        }
    }

    fn report_error(&mut self, error: crate::core::DockdashError) {
        error!("Task failed: {}", error);
        if matches!(
            error,
            crate::core::DockdashError::Docker(DockerError::Connection(_))
        ) {
            self.ui.state.docker_connected = false;
        }
        self.ui
            .state
            .add_notification(NotificationLevel::Error, error.user_message());
    }

    fn setup_terminal(&self) -> crate::core::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()
            .map_err(|e| UiError::Terminal(format!("enable raw mode: {}", e)))?;

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen)
            .map_err(|e| UiError::Terminal(format!("enter alternate screen: {}", e)))?;
        if self.config.ui.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)
                .map_err(|e| UiError::Terminal(format!("enable mouse capture: {}", e)))?;
        }

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| UiError::Terminal(format!("create terminal: {}", e)).into())
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> crate::core::Result<()> {
        terminal::disable_raw_mode()
            .map_err(|e| UiError::Terminal(format!("disable raw mode: {}", e)))?;
        if self.config.ui.mouse_enabled {
            execute!(terminal.backend_mut(), event::DisableMouseCapture)
                .map_err(|e| UiError::Terminal(format!("disable mouse capture: {}", e)))?;
        }
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)
            .map_err(|e| UiError::Terminal(format!("leave alternate screen: {}", e)))?;
        terminal
            .show_cursor()
            .map_err(|e| UiError::Terminal(format!("show cursor: {}", e)))?;
        Ok(())
    }
}
