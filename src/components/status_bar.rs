use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::{Notice, NoticeKind};
use crate::theme::THEME;
use crate::utils;

/// Bottom bar: a single notice slot on the left, connection state and
/// latest block on the right.
pub struct StatusBar {
    pub connected: bool,
    pub latest_block: u64,
    notice: Option<Notice>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            connected: false,
            latest_block: 0,
            notice: None,
        }
    }

    /// Replace the current notice. There is only one slot, so a newer
    /// notice always displaces the old one in place.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bar = Block::default().style(THEME.header_style());
        frame.render_widget(bar, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(32)])
            .split(area);

        let left = match &self.notice {
            Some(notice) => {
                let (prefix, style) = match notice.kind {
                    NoticeKind::Info => ("", THEME.info_style()),
                    NoticeKind::Success => ("", THEME.success_style()),
                    NoticeKind::Error => ("! ", THEME.error_style()),
                    NoticeKind::Pending => ("", THEME.warning_style()),
                };
                Line::from(Span::styled(
                    format!(" {prefix}{}", notice.text),
                    style,
                ))
            }
            None => Line::from(Span::styled(
                " [o] owner  [n] new  [l] last  [a] all  [e/E] export  [?] help  [q] quit",
                THEME.muted_style(),
            )),
        };
        frame.render_widget(Paragraph::new(left).style(THEME.header_style()), chunks[0]);

        let (dot_style, conn_text) = if self.connected {
            (THEME.success_style(), "Connected")
        } else {
            (THEME.error_style(), "Disconnected")
        };
        let right = Line::from(vec![
            Span::styled("\u{25cf} ", dot_style),
            Span::styled(conn_text, Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled(
                format!("#{} ", utils::format_number(self.latest_block)),
                THEME.accent_style(),
            ),
        ]);
        let right_paragraph = Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right_paragraph, chunks[1]);
    }
}
