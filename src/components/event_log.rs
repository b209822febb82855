use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::OwnershipEvent;
use crate::theme::THEME;
use crate::utils;

/// Ownership-transfer history: an optional "last event" summary plus a
/// scrollable table of every `OwnerSet` event in the query window.
pub struct EventLog {
    pub events: Vec<OwnershipEvent>,
    pub last_event: Option<OwnershipEvent>,
    pub loading: bool,
    selected: usize,
    table_state: TableState,
    scroll_state: ScrollbarState,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            last_event: None,
            loading: false,
            selected: 0,
            table_state: TableState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    pub fn set_events(&mut self, events: Vec<OwnershipEvent>) {
        self.events = events;
        self.loading = false;
        self.selected = 0;
        self.table_state.select(if self.events.is_empty() {
            None
        } else {
            Some(0)
        });
        self.scroll_state = self.scroll_state.content_length(self.events.len());
    }

    /// Drop everything. Used when the chain changes underneath us.
    pub fn clear(&mut self) {
        self.set_events(Vec::new());
        self.last_event = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.events.is_empty() {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.events.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => {
                self.selected = 0;
            }
            KeyCode::Char('G') => {
                self.selected = self.events.len() - 1;
            }
            _ => return,
        }
        self.table_state.select(Some(self.selected));
        self.scroll_state = self.scroll_state.position(self.selected);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = if self.last_event.is_some() {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0)])
                .split(area)
        };

        if let Some(event) = &self.last_event {
            self.render_last_event(frame, chunks[0], event.clone());
        }
        let table_area = *chunks.last().unwrap_or(&area);
        self.render_table(frame, table_area);
    }

    fn render_last_event(&self, frame: &mut Frame, area: Rect, event: OwnershipEvent) {
        let block = Block::default()
            .title(" Last Event ")
            .borders(Borders::ALL)
            .border_style(THEME.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tx_span = match event.tx_hash {
            Some(hash) => Span::styled(utils::truncate_hash(&hash), THEME.hash_style()),
            None => Span::styled("-", THEME.muted_style()),
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{}", event.old_owner), THEME.address_style()),
                Span::styled(" -> ", THEME.muted_style()),
                Span::styled(format!("{}", event.new_owner), THEME.address_style()),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("block {} | tx ", utils::format_number(event.block_number)),
                    THEME.muted_style(),
                ),
                tx_span,
                Span::styled(
                    match event.timestamp {
                        Some(ts) => format!(" | {}", utils::format_timestamp(ts)),
                        None => String::new(),
                    },
                    THEME.muted_style(),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            " Events (loading...) ".to_string()
        } else {
            format!(" Events ({}) ", self.events.len())
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(THEME.border_style());

        if self.events.is_empty() {
            let text = if self.loading {
                "Querying events..."
            } else {
                "No events loaded. Press [a] to fetch recent OwnerSet events."
            };
            let paragraph = Paragraph::new(Span::styled(text, THEME.muted_style()))
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(vec!["Block", "Age", "Old Owner", "New Owner", "Tx"])
            .style(THEME.table_header_style())
            .height(1);

        let rows: Vec<Row> = self
            .events
            .iter()
            .map(|event| {
                let age = match event.timestamp {
                    Some(ts) => utils::format_time_ago(ts),
                    None => "-".to_string(),
                };
                let tx = match event.tx_hash {
                    Some(hash) => utils::truncate_hash(&hash),
                    None => "-".to_string(),
                };
                Row::new(vec![
                    Cell::from(utils::format_number(event.block_number)),
                    Cell::from(Span::styled(age, THEME.muted_style())),
                    Cell::from(Span::styled(
                        utils::truncate_address(&event.old_owner),
                        THEME.address_style(),
                    )),
                    Cell::from(Span::styled(
                        utils::truncate_address(&event.new_owner),
                        THEME.address_style(),
                    )),
                    Cell::from(Span::styled(tx, THEME.hash_style())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(16),
                Constraint::Min(14),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(THEME.selected_style())
        .highlight_symbol(" > ");

        frame.render_stateful_widget(table, area, &mut self.table_state);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut self.scroll_state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_events(n: u64) -> Vec<OwnershipEvent> {
        (0..n)
            .map(|i| OwnershipEvent {
                old_owner: Address::from_slice(&[0x11; 20]),
                new_owner: Address::from_slice(&[0x22; 20]),
                block_number: 100 + i,
                tx_hash: None,
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut log = EventLog::new();
        log.set_events(sample_events(3));

        log.handle_key(key(KeyCode::Char('k')));
        assert_eq!(log.selected, 0);

        log.handle_key(key(KeyCode::Char('G')));
        assert_eq!(log.selected, 2);

        log.handle_key(key(KeyCode::Char('j')));
        assert_eq!(log.selected, 2);

        log.handle_key(key(KeyCode::Char('g')));
        assert_eq!(log.selected, 0);
    }

    #[test]
    fn test_set_events_resets_selection() {
        let mut log = EventLog::new();
        log.set_events(sample_events(5));
        log.handle_key(key(KeyCode::Char('G')));
        assert_eq!(log.selected, 4);

        log.set_events(sample_events(2));
        assert_eq!(log.selected, 0);
        assert_eq!(log.table_state.selected(), Some(0));
    }

    #[test]
    fn test_clear_drops_events_and_last_event() {
        let mut log = EventLog::new();
        log.set_events(sample_events(2));
        log.last_event = log.events.first().cloned();

        log.clear();

        assert!(log.events.is_empty());
        assert!(log.last_event.is_none());
        assert_eq!(log.table_state.selected(), None);
    }

    #[test]
    fn test_keys_ignored_when_empty() {
        let mut log = EventLog::new();
        log.handle_key(key(KeyCode::Char('j')));
        assert_eq!(log.selected, 0);
        assert_eq!(log.table_state.selected(), None);
    }
}
