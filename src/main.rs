mod app;
mod components;
mod config;
mod data;
mod events;
mod theme;
mod utils;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::data::provider::EthProvider;
use crate::data::wallet::{load_signer, ConfigKeySource};
use crate::data::OwnerService;
use crate::events::AppEvent;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Without a usable signing key the UI still starts; actions that need
    // the chain report the problem instead.
    let key_source = ConfigKeySource::new(config.private_key.clone());
    let service = match load_signer(&key_source) {
        Ok(signer) => {
            eprintln!("Connecting to {}...", config.rpc_url);
            let provider = EthProvider::connect(&config.rpc_url, signer).await?;
            let chain_id = provider.chain_id();
            let wallet = provider.sender();
            eprintln!("Connected to chain {chain_id} as {wallet}");

            let _ = event_tx.send(AppEvent::Connected { chain_id, wallet });

            let service = Arc::new(OwnerService::new(
                provider,
                config.contract,
                config.lookback_blocks,
                event_tx.clone(),
            ));
            service.spawn_chain_watcher();
            Some(service)
        }
        Err(e) => {
            let _ = event_tx.send(AppEvent::Error(e.to_string()));
            None
        }
    };

    let mut app = App::new(service, event_rx, config.tick_rate_ms, config.contract);

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
