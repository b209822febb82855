use alloy::primitives::Address;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

/// What a key press did while the candidate input was being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Consumed,
    Submit,
    Cancelled,
}

/// The owner read/write panel: current owner value, the candidate input,
/// and the pending-write indicator.
///
/// The candidate input lives here and is mutated only by `handle_edit_key`,
/// so re-renders triggered by unrelated state changes never lose it.
pub struct OwnerPanel {
    pub owner: Option<Address>,
    pub editing: bool,
    pub pending: bool,
    input: String,
    cursor: usize,
}

impl OwnerPanel {
    pub fn new() -> Self {
        Self {
            owner: None,
            editing: false,
            pending: false,
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Discard everything. Used when the chain changes underneath us.
    pub fn reset(&mut self) {
        self.owner = None;
        self.editing = false;
        self.pending = false;
        self.input.clear();
        self.cursor = 0;
    }

    /// Handle a key while editing the candidate address.
    pub fn handle_edit_key(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => {
                self.editing = false;
                InputOutcome::Submit
            }
            KeyCode::Esc => {
                self.editing = false;
                InputOutcome::Cancelled
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.input.remove(self.cursor);
                }
                InputOutcome::Consumed
            }
            KeyCode::Delete => {
                if self.cursor < self.input.len() {
                    self.input.remove(self.cursor);
                }
                InputOutcome::Consumed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Consumed
            }
            KeyCode::Right => {
                if self.cursor < self.input.len() {
                    self.cursor += 1;
                }
                InputOutcome::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Consumed
            }
            KeyCode::End => {
                self.cursor = self.input.len();
                InputOutcome::Consumed
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.input.clear();
                    self.cursor = 0;
                } else {
                    self.input.insert(self.cursor, c);
                    self.cursor += 1;
                }
                InputOutcome::Consumed
            }
            _ => InputOutcome::Consumed,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.editing {
            THEME.border_focused_style()
        } else {
            THEME.border_style()
        };
        let block = Block::default()
            .title(" Owner ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();

        let owner_span = match self.owner {
            Some(addr) => Span::styled(format!("{addr}"), THEME.address_style()),
            None => Span::styled("\u{2014}", THEME.muted_style()),
        };
        lines.push(Line::from(vec![
            Span::styled(" Current owner: ", THEME.muted_style()),
            owner_span,
        ]));
        lines.push(Line::from(""));

        let input_style = if self.editing {
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)
        } else if self.input.is_empty() {
            THEME.muted_style()
        } else {
            Style::default().fg(THEME.text)
        };
        let input_text = if self.input.is_empty() && !self.editing {
            "Press [n] to enter a new owner address".to_string()
        } else {
            self.input.clone()
        };
        lines.push(Line::from(vec![
            Span::styled(" New owner:     ", THEME.muted_style()),
            Span::styled(input_text, input_style),
        ]));

        if self.pending {
            lines.push(Line::from(Span::styled(
                " Transaction pending...",
                THEME.warning_style().add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " [o] Refresh  [n] Edit  [Enter] Change owner",
                THEME.muted_style(),
            )));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(THEME.text));
        frame.render_widget(paragraph, inner);

        // Place the terminal cursor inside the input while editing.
        if self.editing {
            let cursor_x = inner.x + 16 + self.cursor as u16;
            let cursor_y = inner.y + 2;
            if cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
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

    fn type_str(panel: &mut OwnerPanel, s: &str) {
        for c in s.chars() {
            panel.handle_edit_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typed_input_is_kept() {
        let mut panel = OwnerPanel::new();
        panel.start_editing();
        type_str(&mut panel, "0xabc");
        assert_eq!(panel.input(), "0xabc");
    }

    #[test]
    fn test_enter_submits_and_leaves_edit_mode() {
        let mut panel = OwnerPanel::new();
        panel.start_editing();
        type_str(&mut panel, "0x1");
        assert_eq!(panel.handle_edit_key(key(KeyCode::Enter)), InputOutcome::Submit);
        assert!(!panel.editing);
        // The input survives submission so a failed write can be retried.
        assert_eq!(panel.input(), "0x1");
    }

    #[test]
    fn test_esc_cancels_but_keeps_input() {
        let mut panel = OwnerPanel::new();
        panel.start_editing();
        type_str(&mut panel, "0x1");
        assert_eq!(
            panel.handle_edit_key(key(KeyCode::Esc)),
            InputOutcome::Cancelled
        );
        assert!(!panel.editing);
        assert_eq!(panel.input(), "0x1");
    }

    #[test]
    fn test_backspace_at_cursor() {
        let mut panel = OwnerPanel::new();
        panel.start_editing();
        type_str(&mut panel, "0xab");
        panel.handle_edit_key(key(KeyCode::Backspace));
        assert_eq!(panel.input(), "0xa");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut panel = OwnerPanel::new();
        panel.owner = Some(Address::from_slice(&[0x01; 20]));
        panel.pending = true;
        panel.start_editing();
        type_str(&mut panel, "0x1");

        panel.reset();

        assert!(panel.owner.is_none());
        assert!(!panel.pending);
        assert!(!panel.editing);
        assert!(panel.input().is_empty());
    }
}
