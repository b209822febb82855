use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_id: u64,
    pub connected: bool,
    pub wallet: Option<Address>,
    pub contract: Address,
}

impl Header {
    pub fn new(contract: Address) -> Self {
        Self {
            chain_id: 0,
            connected: false,
            wallet: None,
            contract,
        }
    }

    fn display_chain_name(&self) -> &str {
        match self.chain_id {
            1 => "Mainnet",
            5 => "Goerli",
            11155111 => "Sepolia",
            10 => "Optimism",
            42161 => "Arbitrum",
            8453 => "Base",
            137 => "Polygon",
            _ => "Unknown",
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Background for the entire header bar
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(0),
                Constraint::Length(34),
            ])
            .split(area);

        // Left: app title
        let title = Paragraph::new(Span::styled(
            " owner-tui",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        // Center: the contract this session is bound to
        let contract_line = Line::from(vec![
            Span::styled("Contract ", THEME.muted_style()),
            Span::styled(format!("{}", self.contract), THEME.address_style()),
        ]);
        let contract_paragraph = Paragraph::new(contract_line)
            .alignment(Alignment::Center)
            .style(THEME.header_style());
        frame.render_widget(contract_paragraph, chunks[1]);

        // Right: chain and signing account
        let wallet_str = self
            .wallet
            .map(|w| utils::truncate_address(&w))
            .unwrap_or_else(|| "no wallet".to_string());
        let network_info = Line::from(vec![
            Span::styled(self.display_chain_name(), Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled(format!("{wallet_str} "), THEME.accent_style()),
        ]);
        let network_paragraph = Paragraph::new(network_info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(network_paragraph, chunks[2]);
    }
}
