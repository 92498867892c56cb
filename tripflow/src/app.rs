use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;

use crate::auth::StoredToken;
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::cli::DeepLink;
use crate::commands::{executor, handlers};
use crate::events::AppCommand;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::screens::Screen;
use traveler_api::Client;

pub struct App {
    token: StoredToken,
    settings: Settings,
    deep_link: Option<DeepLink>,
}

impl App {
    pub fn new(token: StoredToken, settings: Settings, deep_link: Option<DeepLink>) -> Self {
        Self {
            token,
            settings,
            deep_link,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(5000);
        let _log_path = init_logging_with_buffer(log_buffer.clone())?;

        tracing::info!("tripflow starting");

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::with_variant(self.settings.flow_variant);
        let mut task_manager = BackgroundTaskManager::new();

        let api_client = Arc::new(match &self.settings.api_url {
            Some(url) => Client::with_base_url(url, &self.token.access_token),
            None => Client::new(&self.token.access_token),
        });
        let data_loader = DataLoader::new(api_client.clone(), data_tx.clone());

        let mut event_stream = EventStream::new();

        self.init_data(&mut ui_state, &mut task_manager, &data_loader);

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            // Reload the day list when a trip point was just created
            executor::consume_pending_refresh(&mut ui_state, &mut task_manager, &data_loader);

            // Open the deep-linked add form once its day is ready
            executor::consume_pending_deep_link(&mut ui_state, &mut task_manager, &data_loader);

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                    ui_state.tick_notice();
                }
                Some(Ok(event)) = event_stream.next() => {
                    match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            // Don't log when on logs screen to avoid feedback loop
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                        _ => {
                            // Ignore other events
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            // Check if we should quit
            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Cancel all background data loading tasks
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn init_data(
        &self,
        ui_state: &mut AppState,
        task_manager: &mut BackgroundTaskManager,
        data_loader: &DataLoader,
    ) {
        tracing::info!("Loading trips and categories");
        executor::execute_command(AppCommand::LoadTrips, ui_state, task_manager, data_loader);
        executor::execute_command(
            AppCommand::LoadCategories,
            ui_state,
            task_manager,
            data_loader,
        );

        if let Some(link) = &self.deep_link {
            tracing::info!("Deep link: trip {} day {}", link.trip_id, link.day_id);
            ui_state.pending_attraction = link.attraction_id.clone();
            executor::execute_command(
                AppCommand::LoadTrip {
                    trip_id: link.trip_id,
                },
                ui_state,
                task_manager,
                data_loader,
            );
            executor::execute_command(
                AppCommand::LoadTripDay {
                    trip_id: link.trip_id,
                    day_id: link.day_id,
                },
                ui_state,
                task_manager,
                data_loader,
            );
        }
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
