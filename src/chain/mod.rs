//! Sui chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! MintRequest + resolved recipient
//!     → transaction.rs (entry point + ordered arguments)
//!     → wallet.rs (sign and execute through the wallet)
//!     → client.rs (poll the full node until final)
//! ```
//!
//! # Constraints
//! - Keys stay inside the wallet; this crate never signs
//! - Every RPC call has a configurable timeout
//! - Wallet and node are reached through traits so tests can swap them out

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{FinalityProvider, SuiClient};
pub use transaction::{CallArg, MintTxBuilder, MoveCallTarget, TransactionDescriptor};
pub use types::{ChainError, ChainResult, ExecutionResult, FinalityReport, SuiAddress, TransactionDigest};
pub use wallet::{BridgeWallet, WalletAdapter};
