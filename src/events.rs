use alloy::primitives::{Address, B256};
use thiserror::Error;

use crate::data::types::OwnershipEvent;

/// Client-side rejection of a candidate owner address. Raised before any
/// network contact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter an address")]
    Empty,
    #[error("Address must start with 0x")]
    MissingPrefix,
    #[error("Address must be 42 characters, got {0}")]
    BadLength(usize),
    #[error("Address contains invalid hex")]
    BadHex,
}

/// Parse a candidate owner address typed by the user.
pub fn parse_candidate(input: &str) -> Result<Address, ValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !input.starts_with("0x") && !input.starts_with("0X") {
        return Err(ValidationError::MissingPrefix);
    }
    if input.len() != 42 {
        return Err(ValidationError::BadLength(input.len()));
    }
    input.parse::<Address>().map_err(|_| ValidationError::BadHex)
}

/// Events sent from background flows to the main app loop.
///
/// Flow results carry the session generation they were started under; the
/// app drops any result whose session is stale (a chain change happened
/// while the flow was in flight).
#[derive(Debug)]
pub enum AppEvent {
    // Connection
    Connected { chain_id: u64, wallet: Address },
    LatestBlock(u64),
    ChainChanged { chain_id: u64 },

    // Owner read/write flow
    OwnerLoaded { session: u64, owner: Address },
    OwnerReadFailed { session: u64, reason: String },
    WriteSubmitted { session: u64, tx_hash: B256 },
    WriteSucceeded { session: u64, tx_hash: B256 },
    WriteFailed { session: u64, reason: String },

    // Event query flow
    LastEventLoaded { session: u64, event: Option<OwnershipEvent> },
    EventsLoaded { session: u64, events: Vec<OwnershipEvent> },
    QueryFailed { session: u64, reason: String },

    // Export
    ExportComplete(String),

    // Status
    Error(String),
}

impl AppEvent {
    /// The session generation this event belongs to, if it is a flow result.
    pub fn session(&self) -> Option<u64> {
        match self {
            AppEvent::OwnerLoaded { session, .. }
            | AppEvent::OwnerReadFailed { session, .. }
            | AppEvent::WriteSubmitted { session, .. }
            | AppEvent::WriteSucceeded { session, .. }
            | AppEvent::WriteFailed { session, .. }
            | AppEvent::LastEventLoaded { session, .. }
            | AppEvent::EventsLoaded { session, .. }
            | AppEvent::QueryFailed { session, .. } => Some(*session),
            _ => None,
        }
    }

    /// Whether this event may be applied under the given current session.
    /// Events without a session (connection status, exports) always apply.
    pub fn applies_to(&self, current_session: u64) -> bool {
        self.session().is_none_or(|s| s == current_session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let input = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
        assert!(parse_candidate(input).is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let input = "  0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045  ";
        assert!(parse_candidate(input).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_candidate(""), Err(ValidationError::Empty));
        assert_eq!(parse_candidate("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_parse_missing_prefix() {
        assert_eq!(
            parse_candidate("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            Err(ValidationError::MissingPrefix)
        );
        assert_eq!(
            parse_candidate("hello world"),
            Err(ValidationError::MissingPrefix)
        );
    }

    #[test]
    fn test_parse_bad_length() {
        assert_eq!(parse_candidate("0x"), Err(ValidationError::BadLength(2)));
        assert_eq!(
            parse_candidate("0xabcdef"),
            Err(ValidationError::BadLength(8))
        );
        // A tx-hash-length string is not an address either.
        let hash = "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890";
        assert_eq!(parse_candidate(hash), Err(ValidationError::BadLength(66)));
    }

    #[test]
    fn test_parse_bad_hex() {
        let input = "0xZZdA6BF26964aF9D7eEd9e03E53415D37aA96045";
        assert_eq!(parse_candidate(input), Err(ValidationError::BadHex));
    }

    #[test]
    fn test_stale_flow_results_do_not_apply() {
        let event = AppEvent::OwnerLoaded {
            session: 0,
            owner: Address::ZERO,
        };
        assert!(event.applies_to(0));
        assert!(!event.applies_to(1));
    }

    #[test]
    fn test_sessionless_events_always_apply() {
        let event = AppEvent::LatestBlock(42);
        assert!(event.session().is_none());
        assert!(event.applies_to(0));
        assert!(event.applies_to(7));
    }
}
