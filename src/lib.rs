//! NFT mint client for the Sui network.
//!
//! Validates NFT metadata, asks a wallet to sign and execute the mint call, and
//! follows the transaction until the full node reports it final.

pub mod chain;
pub mod config;
pub mod mint;
pub mod observability;

pub use chain::{BridgeWallet, SuiClient};
pub use config::MintConfig;
pub use mint::{MintForm, MintWorkflow};
