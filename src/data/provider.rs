use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{BlockNumberOrTag, Filter, Log, TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportResult;
use color_eyre::eyre::Result;

/// The concrete provider type returned by `ProviderBuilder` carries the full
/// filler-stack generics; a trait-object wrapper keeps signatures readable.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
    sender: Address,
}

impl EthProvider {
    /// Connect to an Ethereum node via HTTP RPC, signing with the given key.
    pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let url = rpc_url.parse()?;
        let sender = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
        let chain_id = provider.get_chain_id().await?;
        Ok(Self {
            provider: Box::new(provider),
            chain_id,
            sender,
        })
    }

    /// Chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the signing account.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Re-query the chain ID from the node. Used by the chain watcher to
    /// detect the node switching networks underneath us.
    pub async fn live_chain_id(&self) -> TransportResult<u64> {
        self.provider.get_chain_id().await
    }

    /// Get the latest block number.
    pub async fn get_latest_block_number(&self) -> TransportResult<u64> {
        self.provider.get_block_number().await
    }

    /// Get the timestamp of a block, if the block exists.
    pub async fn get_block_timestamp(&self, number: u64) -> TransportResult<Option<u64>> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await?;
        Ok(block.map(|b| b.header.timestamp))
    }

    /// Execute a read-only call against current chain state.
    pub async fn call(&self, tx: TransactionRequest) -> TransportResult<Bytes> {
        self.provider.call(tx).await
    }

    /// Submit a state-changing transaction, returning its hash once the
    /// wallet has signed it and the node has accepted it into the pool.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> TransportResult<B256> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    /// Get a transaction receipt, or None while the transaction is unmined.
    pub async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> TransportResult<Option<TransactionReceipt>> {
        self.provider.get_transaction_receipt(hash).await
    }

    /// Fetch logs matching a filter, in ascending block order.
    pub async fn get_logs(&self, filter: &Filter) -> TransportResult<Vec<Log>> {
        self.provider.get_logs(filter).await
    }
}
