use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if the key was consumed by the overlay.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.visible {
            return false;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.visible = false;
            }
            _ => {}
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let bindings: &[(&str, &str)] = &[
            ("o", "Refresh current owner"),
            ("n", "Enter a new owner address"),
            ("Enter", "Submit the ownership change"),
            ("Esc", "Cancel editing"),
            ("l", "Fetch the most recent OwnerSet event"),
            ("a", "Fetch all recent OwnerSet events"),
            ("e", "Export events to CSV"),
            ("E", "Export events to JSON"),
            ("j/k", "Scroll events"),
            ("g/G", "Jump to top / bottom"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ];

        let width = 46u16.min(area.width);
        let height = (bindings.len() as u16 + 4).min(area.height);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let lines: Vec<Line> = bindings
            .iter()
            .map(|(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {keys:>6}  "), THEME.accent_style()),
                    Span::styled(*desc, Style::default().fg(THEME.text)),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_hidden_overlay_passes_keys_through() {
        let mut help = HelpOverlay::new();
        assert!(!help.handle_key(key(KeyCode::Char('j'))));
    }

    #[test]
    fn test_visible_overlay_consumes_and_closes() {
        let mut help = HelpOverlay::new();
        help.toggle();
        assert!(help.visible);

        // Unrelated keys are swallowed while the overlay is open.
        assert!(help.handle_key(key(KeyCode::Char('j'))));
        assert!(help.visible);

        assert!(help.handle_key(key(KeyCode::Esc)));
        assert!(!help.visible);
    }
}
