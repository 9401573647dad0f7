//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mint client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration for the mint client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintConfig {
    /// Network selection and RPC settings.
    pub network: NetworkConfig,

    /// On-chain entry point of the mint call.
    pub contract: ContractConfig,

    /// Wallet bridge settings.
    pub wallet: WalletConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Sui network a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl Network {
    /// Public full node URL for this network.
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}

/// Network and RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network name (mainnet, testnet, devnet).
    pub network: Network,

    /// Explicit full node URL. Takes precedence over the network URL when non-empty.
    pub fullnode_url: Option<String>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Upper bound on waiting for a transaction to be finalized, in seconds.
    pub finality_timeout_secs: u64,

    /// Delay between finality polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl NetworkConfig {
    /// Resolve the RPC endpoint: the override URL if set, the network URL otherwise.
    pub fn resolve_rpc_url(&self) -> String {
        match self.fullnode_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.network.fullnode_url().to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            fullnode_url: None,
            rpc_timeout_secs: 30,
            finality_timeout_secs: 60,
            poll_interval_ms: 2000,
        }
    }
}

/// Move entry point the mint call targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Package that publishes the NFT module. Required.
    pub package_id: Option<String>,

    /// Mint capability object passed as the first call argument. Required.
    pub mint_cap_id: Option<String>,

    /// Module name inside the package.
    pub module: String,

    /// Entry function name inside the module.
    pub function: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            package_id: None,
            mint_cap_id: None,
            module: "nft".to_string(),
            function: "mint".to_string(),
        }
    }
}

/// Wallet bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Base URL of the local wallet bridge.
    pub bridge_url: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            bridge_url: "http://127.0.0.1:7878".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
