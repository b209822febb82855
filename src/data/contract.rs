use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256};
use alloy::rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest};
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};
use thiserror::Error;

use crate::data::provider::EthProvider;
use crate::data::revert;
use crate::data::types::OwnershipEvent;

sol! {
    function getOwner() external view returns (address);
    function changeOwner(address newOwner) external;
    event OwnerSet(address indexed oldOwner, address indexed newOwner);
}

/// Default deployment of the owner registry (Sepolia).
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xA58B470E57301D4052ef6aEf2e8E30d8326b94b2";

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("call failed: {reason}")]
    Call { reason: String },
    #[error("could not submit transaction: {reason}")]
    Submission { reason: String },
    #[error("transaction failed: {reason}")]
    Confirmation { reason: String },
    #[error("event query failed: {reason}")]
    Query { reason: String },
}

/// The fixed contract binding: address plus the interface above, executed
/// through the connected provider. Immutable after construction.
pub struct OwnerContract {
    provider: Arc<EthProvider>,
    address: Address,
}

impl OwnerContract {
    pub fn new(provider: Arc<EthProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Read the current owner via `getOwner()`.
    pub async fn owner(&self) -> Result<Address, ContractError> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(getOwnerCall {}.abi_encode());
        let raw = self.provider.call(tx).await.map_err(|e| ContractError::Call {
            reason: revert::describe(&e),
        })?;
        let decoded = getOwnerCall::abi_decode_returns(&raw, true)
            .map_err(|e| ContractError::Call { reason: e.to_string() })?;
        Ok(decoded._0)
    }

    /// Submit `changeOwner(newOwner)`. Returns the transaction hash; the
    /// caller decides when (and whether) to wait for confirmation.
    pub async fn submit_change_owner(&self, new_owner: Address) -> Result<B256, ContractError> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(changeOwnerCall { newOwner: new_owner }.abi_encode());
        self.provider
            .send_transaction(tx)
            .await
            .map_err(|e| ContractError::Submission {
                reason: revert::describe(&e),
            })
    }

    /// Wait until the transaction is mined and its outcome is known.
    ///
    /// Polls cooperatively; no timeout is imposed here. Abandoning the
    /// future (session reset, exit) is the only cancellation path.
    pub async fn await_confirmation(&self, hash: B256) -> Result<TransactionReceipt, ContractError> {
        loop {
            match self.provider.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) => {
                    if receipt.status() {
                        return Ok(receipt);
                    }
                    return Err(ContractError::Confirmation {
                        reason: "execution reverted on-chain".to_string(),
                    });
                }
                Ok(None) => tokio::time::sleep(RECEIPT_POLL_INTERVAL).await,
                Err(e) => {
                    return Err(ContractError::Confirmation {
                        reason: revert::describe(&e),
                    });
                }
            }
        }
    }

    /// Query `OwnerSet` events over `[from_block, to_block]`, decoded in
    /// ascending block order. An empty result is a valid outcome.
    pub async fn owner_set_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<OwnershipEvent>, ContractError> {
        let filter = Filter::new()
            .address(self.address)
            .event_signature(OwnerSet::SIGNATURE_HASH)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| ContractError::Query {
                reason: revert::describe(&e),
            })?;

        Ok(logs.iter().filter_map(decode_owner_set).collect())
    }
}

/// Decode one `OwnerSet` log. Logs that do not match the event shape are
/// skipped rather than treated as errors.
pub fn decode_owner_set(log: &Log) -> Option<OwnershipEvent> {
    let decoded = OwnerSet::decode_log(&log.inner, true).ok()?;
    Some(OwnershipEvent {
        old_owner: decoded.data.oldOwner,
        new_owner: decoded.data.newOwner,
        block_number: log.block_number.unwrap_or(0),
        tx_hash: log.transaction_hash,
        timestamp: log.block_timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, Log as PrimitiveLog, LogData};

    fn address_topic(addr: Address) -> B256 {
        let mut topic = B256::ZERO;
        topic.0[12..].copy_from_slice(addr.as_slice());
        topic
    }

    fn make_owner_set_log(old: Address, new: Address, block: u64) -> Log {
        let log_data = LogData::new(
            vec![
                OwnerSet::SIGNATURE_HASH,
                address_topic(old),
                address_topic(new),
            ],
            Bytes::new(),
        )
        .unwrap();

        Log {
            inner: PrimitiveLog {
                address: Address::from_slice(&[0xaa; 20]),
                data: log_data,
            },
            block_hash: None,
            block_number: Some(block),
            block_timestamp: None,
            transaction_hash: Some(B256::from_slice(&[0x42; 32])),
            transaction_index: None,
            log_index: None,
            removed: false,
        }
    }

    #[test]
    fn test_decode_owner_set() {
        let old = Address::from_slice(&[0x01; 20]);
        let new = Address::from_slice(&[0x02; 20]);
        let event = decode_owner_set(&make_owner_set_log(old, new, 123)).unwrap();

        assert_eq!(event.old_owner, old);
        assert_eq!(event.new_owner, new);
        assert_eq!(event.block_number, 123);
        assert_eq!(event.tx_hash, Some(B256::from_slice(&[0x42; 32])));
    }

    #[test]
    fn test_decode_skips_wrong_signature() {
        let mut log = make_owner_set_log(Address::ZERO, Address::ZERO, 1);
        let topics = vec![B256::ZERO, B256::ZERO, B256::ZERO];
        log.inner.data = LogData::new(topics, Bytes::new()).unwrap();
        assert!(decode_owner_set(&log).is_none());
    }

    #[test]
    fn test_decode_skips_missing_topics() {
        let mut log = make_owner_set_log(Address::ZERO, Address::ZERO, 1);
        log.inner.data = LogData::new(vec![OwnerSet::SIGNATURE_HASH], Bytes::new()).unwrap();
        assert!(decode_owner_set(&log).is_none());
    }

    #[test]
    fn test_change_owner_calldata_round_trip() {
        let candidate = Address::from_slice(&[0x0d; 20]);
        let encoded = changeOwnerCall { newOwner: candidate }.abi_encode();
        // 4-byte selector + one 32-byte address word
        assert_eq!(encoded.len(), 36);

        let decoded = changeOwnerCall::abi_decode(&encoded, true).unwrap();
        assert_eq!(decoded.newOwner, candidate);
    }

    #[test]
    fn test_default_contract_address_parses() {
        assert!(DEFAULT_CONTRACT_ADDRESS.parse::<Address>().is_ok());
    }
}
