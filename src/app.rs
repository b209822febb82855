use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::event_log::EventLog;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::owner_panel::{InputOutcome, OwnerPanel};
use crate::components::status_bar::StatusBar;
use crate::data::types::Notice;
use crate::data::OwnerService;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

const NO_WALLET_HINT: &str =
    "No signing key configured. Restart with --private-key or PRIVATE_KEY set.";

pub struct App {
    // Components
    header: Header,
    owner_panel: OwnerPanel,
    event_log: EventLog,
    status_bar: StatusBar,
    help: HelpOverlay,

    // Data
    service: Option<Arc<OwnerService>>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    session: u64,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        service: Option<Arc<OwnerService>>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        tick_rate_ms: u64,
        contract: Address,
    ) -> Self {
        Self {
            header: Header::new(contract),
            owner_panel: OwnerPanel::new(),
            event_log: EventLog::new(),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            service,
            event_rx,
            session: 0,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // Initial data load
        if let Some(service) = &self.service {
            service.fetch_owner();
        }

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Fill background
        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | owner panel (7) | event log (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);
        self.owner_panel.render(frame, chunks[1]);
        self.event_log.render(frame, chunks[2]);
        self.status_bar.render(frame, chunks[3]);

        // Overlay on top
        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }

            // Help overlay consumes all keys when visible
            if self.help.handle_key(key) {
                return;
            }

            // Editing mode owns the keyboard
            if self.owner_panel.editing {
                match self.owner_panel.handle_edit_key(key) {
                    InputOutcome::Submit => self.submit_change_owner(),
                    InputOutcome::Consumed | InputOutcome::Cancelled => {}
                }
                return;
            }

            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                KeyCode::Char('?') => {
                    self.help.toggle();
                }
                KeyCode::Char('o') => {
                    if let Some(service) = self.require_service() {
                        service.fetch_owner();
                    }
                }
                KeyCode::Char('n') => {
                    self.owner_panel.start_editing();
                }
                KeyCode::Enter => {
                    self.submit_change_owner();
                }
                KeyCode::Char('l') => {
                    if let Some(service) = self.require_service() {
                        self.event_log.loading = true;
                        service.fetch_last_event();
                    }
                }
                KeyCode::Char('a') => {
                    if let Some(service) = self.require_service() {
                        self.event_log.loading = true;
                        service.fetch_events();
                    }
                }
                KeyCode::Char('e') => {
                    self.export_events(false);
                }
                KeyCode::Char('E') => {
                    self.export_events(true);
                }
                _ => {
                    self.event_log.handle_key(key);
                }
            }
        }
    }

    fn require_service(&mut self) -> Option<Arc<OwnerService>> {
        if self.service.is_none() {
            self.status_bar.set_notice(Notice::error(NO_WALLET_HINT));
        }
        self.service.clone()
    }

    fn submit_change_owner(&mut self) {
        // The trigger is disabled while a write is in flight.
        if self.owner_panel.pending {
            return;
        }
        let Some(service) = self.require_service() else {
            return;
        };

        match service.change_owner(self.owner_panel.input()) {
            Ok(()) => {
                self.owner_panel.pending = true;
                self.status_bar
                    .set_notice(Notice::pending("Transaction pending..."));
            }
            Err(e) => {
                self.status_bar.set_notice(Notice::error(e.to_string()));
            }
        }
    }

    fn export_events(&mut self, json: bool) {
        if self.event_log.events.is_empty() {
            self.status_bar
                .set_notice(Notice::error("No events to export. Press [a] first."));
            return;
        }
        let Some(service) = self.require_service() else {
            return;
        };
        service.export_events(self.event_log.events.clone(), json);
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        // Results of flows started before the last chain change are stale.
        if !event.applies_to(self.session) {
            return;
        }

        match event {
            AppEvent::Connected { chain_id, wallet } => {
                self.header.chain_id = chain_id;
                self.header.connected = true;
                self.header.wallet = Some(wallet);
                self.status_bar.connected = true;
            }
            AppEvent::LatestBlock(number) => {
                self.status_bar.latest_block = number;
                self.status_bar.connected = true;
            }
            AppEvent::ChainChanged { chain_id } => {
                self.session += 1;
                self.owner_panel.reset();
                self.event_log.clear();
                self.header.chain_id = chain_id;
                self.status_bar
                    .set_notice(Notice::info("Network changed; state reset"));
                if let Some(service) = &self.service {
                    service.fetch_owner();
                }
            }
            AppEvent::OwnerLoaded { owner, .. } => {
                self.owner_panel.owner = Some(owner);
                self.status_bar.set_notice(Notice::success("Owner fetched"));
            }
            AppEvent::OwnerReadFailed { reason, .. } => {
                self.status_bar.set_notice(Notice::error(reason));
            }
            AppEvent::WriteSubmitted { tx_hash, .. } => {
                self.status_bar.set_notice(Notice::pending(format!(
                    "Submitted {}; awaiting confirmation...",
                    utils::truncate_hash(&tx_hash)
                )));
            }
            AppEvent::WriteSucceeded { .. } => {
                self.owner_panel.pending = false;
                self.status_bar.set_notice(Notice::success("Owner updated!"));
            }
            AppEvent::WriteFailed { reason, .. } => {
                self.owner_panel.pending = false;
                self.status_bar.set_notice(Notice::error(reason));
            }
            AppEvent::LastEventLoaded { event, .. } => {
                self.event_log.loading = false;
                match event {
                    Some(event) => {
                        self.event_log.last_event = Some(event);
                        self.status_bar
                            .set_notice(Notice::success("Last event loaded"));
                    }
                    None => {
                        self.status_bar
                            .set_notice(Notice::info("No events in the look-back window"));
                    }
                }
            }
            AppEvent::EventsLoaded { events, .. } => {
                let count = events.len();
                self.event_log.set_events(events);
                self.status_bar
                    .set_notice(Notice::success(format!("Loaded {count} events")));
            }
            AppEvent::QueryFailed { reason, .. } => {
                self.event_log.loading = false;
                self.status_bar.set_notice(Notice::error(reason));
            }
            AppEvent::ExportComplete(msg) => {
                self.status_bar.set_notice(Notice::success(msg));
            }
            AppEvent::Error(msg) => {
                self.status_bar.set_notice(Notice::error(msg));
            }
        }
    }
}
