use alloy::primitives::Address;
use clap::Parser;

use crate::data::contract::DEFAULT_CONTRACT_ADDRESS;
use crate::data::EVENT_LOOKBACK_BLOCKS;

#[derive(Parser, Debug)]
#[command(name = "owner-tui", about = "Terminal client for the owner registry contract")]
pub struct Config {
    /// RPC endpoint URL
    #[arg(
        short,
        long,
        default_value = "https://ethereum-sepolia-rpc.publicnode.com"
    )]
    pub rpc_url: String,

    /// Owner registry contract address
    #[arg(long, default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract: Address,

    /// Hex-encoded private key used to sign changeOwner transactions
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// How many recent blocks event queries look back over
    #[arg(long, default_value_t = EVENT_LOOKBACK_BLOCKS)]
    pub lookback_blocks: u64,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,
}
