use alloy::primitives::{Address, B256};
use serde::Serialize;

/// A decoded `OwnerSet` log entry.
///
/// Produced only by querying historical logs; never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub block_number: u64,
    pub tx_hash: Option<B256>,
    pub timestamp: Option<u64>,
}

/// Reorder an ascending-block query result for display (most recent first).
pub fn newest_first(mut events: Vec<OwnershipEvent>) -> Vec<OwnershipEvent> {
    events.reverse();
    events
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
    Pending,
}

/// A transient status message. The status bar holds a single notice slot,
/// so a newer notice always replaces the previous one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Pending, text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(block: u64) -> OwnershipEvent {
        OwnershipEvent {
            old_owner: Address::from_slice(&[0x01; 20]),
            new_owner: Address::from_slice(&[0x02; 20]),
            block_number: block,
            tx_hash: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_newest_first_empty() {
        assert!(newest_first(vec![]).is_empty());
    }

    #[test]
    fn test_newest_first_single() {
        let events = newest_first(vec![make_event(10)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].block_number, 10);
    }

    #[test]
    fn test_newest_first_many_is_exact_reverse() {
        let ascending = vec![make_event(1), make_event(5), make_event(9)];
        let display = newest_first(ascending.clone());
        let blocks: Vec<u64> = display.iter().map(|e| e.block_number).collect();
        assert_eq!(blocks, vec![9, 5, 1]);

        let mut round_trip = display;
        round_trip.reverse();
        assert_eq!(round_trip, ascending);
    }

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::info("a").kind, NoticeKind::Info);
        assert_eq!(Notice::success("a").kind, NoticeKind::Success);
        assert_eq!(Notice::error("a").kind, NoticeKind::Error);
        assert_eq!(Notice::pending("a").kind, NoticeKind::Pending);
    }
}
