pub mod cache;
pub mod contract;
pub mod export;
pub mod provider;
pub mod revert;
pub mod types;
pub mod wallet;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use crate::data::cache::TimestampCache;
use crate::data::contract::OwnerContract;
use crate::data::provider::EthProvider;
use crate::data::types::{newest_first, OwnershipEvent};
use crate::events::{parse_candidate, AppEvent, ValidationError};

/// How many recent blocks the event queries look back over.
pub const EVENT_LOOKBACK_BLOCKS: u64 = 5_000;

const CHAIN_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Background flows behind the UI: owner read/write and event queries.
///
/// Every spawned flow captures the session generation current at spawn
/// time and stamps it onto its result events. The chain watcher bumps the
/// generation when the node switches networks, which strands any in-flight
/// results; the app loop discards them on arrival.
pub struct OwnerService {
    provider: Arc<EthProvider>,
    contract: Arc<OwnerContract>,
    timestamps: Arc<RwLock<TimestampCache>>,
    session: Arc<AtomicU64>,
    lookback_blocks: u64,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl OwnerService {
    pub fn new(
        provider: EthProvider,
        contract_address: Address,
        lookback_blocks: u64,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let provider = Arc::new(provider);
        let contract = Arc::new(OwnerContract::new(Arc::clone(&provider), contract_address));
        Self {
            provider,
            contract,
            timestamps: Arc::new(RwLock::new(TimestampCache::new())),
            session: Arc::new(AtomicU64::new(0)),
            lookback_blocks,
            event_tx,
        }
    }

    fn current_session(&self) -> u64 {
        self.session.load(Ordering::SeqCst)
    }

    /// Read the current owner and report it as an event.
    pub fn fetch_owner(&self) {
        let session = self.current_session();
        let contract = Arc::clone(&self.contract);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match contract.owner().await {
                Ok(owner) => {
                    let _ = tx.send(AppEvent::OwnerLoaded { session, owner });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::OwnerReadFailed {
                        session,
                        reason: e.to_string(),
                    });
                }
            }
        });
    }

    /// Validate and submit an ownership change.
    ///
    /// Validation is synchronous and happens before any network contact;
    /// a malformed candidate never reaches the wire. `Ok(())` means the
    /// write flow was dispatched and the caller should treat the write as
    /// pending until its terminal event arrives.
    pub fn change_owner(&self, input: &str) -> Result<(), ValidationError> {
        let candidate = parse_candidate(input)?;

        let session = self.current_session();
        let contract = Arc::clone(&self.contract);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let hash = match contract.submit_change_owner(candidate).await {
                Ok(hash) => {
                    let _ = tx.send(AppEvent::WriteSubmitted {
                        session,
                        tx_hash: hash,
                    });
                    hash
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::WriteFailed {
                        session,
                        reason: e.to_string(),
                    });
                    return;
                }
            };

            if let Err(e) = contract.await_confirmation(hash).await {
                let _ = tx.send(AppEvent::WriteFailed {
                    session,
                    reason: e.to_string(),
                });
                return;
            }

            let _ = tx.send(AppEvent::WriteSucceeded {
                session,
                tx_hash: hash,
            });

            // Exactly one refreshing read after a confirmed write.
            match contract.owner().await {
                Ok(owner) => {
                    let _ = tx.send(AppEvent::OwnerLoaded { session, owner });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::OwnerReadFailed {
                        session,
                        reason: e.to_string(),
                    });
                }
            }
        });

        Ok(())
    }

    /// Fetch the most recent `OwnerSet` event within the look-back window.
    pub fn fetch_last_event(&self) {
        let session = self.current_session();
        let provider = Arc::clone(&self.provider);
        let contract = Arc::clone(&self.contract);
        let timestamps = Arc::clone(&self.timestamps);
        let lookback = self.lookback_blocks;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match query_window(&provider, &contract, &timestamps, lookback).await {
                Ok(mut events) => {
                    // Query order is ascending, so the last entry is newest.
                    let last = events.pop();
                    let _ = tx.send(AppEvent::LastEventLoaded {
                        session,
                        event: last,
                    });
                }
                Err(reason) => {
                    let _ = tx.send(AppEvent::QueryFailed { session, reason });
                }
            }
        });
    }

    /// Fetch every `OwnerSet` event within the look-back window,
    /// newest first for display.
    pub fn fetch_events(&self) {
        let session = self.current_session();
        let provider = Arc::clone(&self.provider);
        let contract = Arc::clone(&self.contract);
        let timestamps = Arc::clone(&self.timestamps);
        let lookback = self.lookback_blocks;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match query_window(&provider, &contract, &timestamps, lookback).await {
                Ok(events) => {
                    let _ = tx.send(AppEvent::EventsLoaded {
                        session,
                        events: newest_first(events),
                    });
                }
                Err(reason) => {
                    let _ = tx.send(AppEvent::QueryFailed { session, reason });
                }
            }
        });
    }

    /// Write the given event history to disk.
    pub fn export_events(&self, events: Vec<OwnershipEvent>, json: bool) {
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = if json {
                let path = export::default_export_path("json");
                export::export_events_json(&events, &path)
            } else {
                let path = export::default_export_path("csv");
                export::export_events_csv(&events, &path)
            };
            match result {
                Ok(msg) => {
                    let _ = tx.send(AppEvent::ExportComplete(msg));
                }
                Err(msg) => {
                    let _ = tx.send(AppEvent::Error(msg));
                }
            }
        });
    }

    /// Watch for the node switching chains and keep the latest block number
    /// fresh. On a chain change the session generation is bumped before the
    /// notification goes out, so results of flows started under the old
    /// chain can never be applied.
    pub fn spawn_chain_watcher(&self) {
        let provider = Arc::clone(&self.provider);
        let timestamps = Arc::clone(&self.timestamps);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        let mut known_chain_id = provider.chain_id();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CHAIN_POLL_INTERVAL);
            loop {
                interval.tick().await;

                if let Ok(number) = provider.get_latest_block_number().await {
                    let _ = tx.send(AppEvent::LatestBlock(number));
                }

                if let Ok(chain_id) = provider.live_chain_id().await {
                    if chain_id != known_chain_id {
                        known_chain_id = chain_id;
                        session.fetch_add(1, Ordering::SeqCst);
                        timestamps.write().await.clear();
                        let _ = tx.send(AppEvent::ChainChanged { chain_id });
                    }
                }
            }
        });
    }
}

/// Bounds of the look-back window ending at `latest`, clamped at genesis.
/// Degenerate inputs (latest near or at 0) collapse to a valid range.
pub fn window_bounds(latest: u64, lookback: u64) -> (u64, u64) {
    (latest.saturating_sub(lookback), latest)
}

/// Query the look-back window and annotate each event with its block
/// timestamp. Timestamp annotation is best-effort; a missing timestamp
/// never fails the query.
async fn query_window(
    provider: &EthProvider,
    contract: &OwnerContract,
    timestamps: &RwLock<TimestampCache>,
    lookback: u64,
) -> Result<Vec<OwnershipEvent>, String> {
    let latest = provider
        .get_latest_block_number()
        .await
        .map_err(|e| revert::describe(&e))?;

    let (from, to) = window_bounds(latest, lookback);
    let mut events = contract
        .owner_set_events(from, to)
        .await
        .map_err(|e| e.to_string())?;

    for event in &mut events {
        if event.timestamp.is_some() {
            continue;
        }
        {
            let mut cache = timestamps.write().await;
            if let Some(ts) = cache.get(event.block_number) {
                event.timestamp = Some(ts);
                continue;
            }
        }
        if let Ok(Some(ts)) = provider.get_block_timestamp(event.block_number).await {
            timestamps.write().await.put(event.block_number, ts);
            event.timestamp = Some(ts);
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_normal() {
        assert_eq!(window_bounds(100_000, 5_000), (95_000, 100_000));
    }

    #[test]
    fn test_window_bounds_clamped_at_genesis() {
        assert_eq!(window_bounds(3_000, 5_000), (0, 3_000));
    }

    #[test]
    fn test_window_bounds_at_genesis() {
        // Near genesis the range degenerates to a single block; the query
        // must still be well-formed (from <= to).
        assert_eq!(window_bounds(0, 5_000), (0, 0));
    }

    #[test]
    fn test_window_bounds_zero_lookback() {
        assert_eq!(window_bounds(42, 0), (42, 42));
    }
}
