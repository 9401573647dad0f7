//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (SUI_NETWORK, SUI_PACKAGE_ID, ...)
//!     → validation.rs (semantic checks)
//!     → MintConfig (validated, immutable)
//!     → passed by reference to the transaction builder and RPC client
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Missing on-chain identifiers are fatal: the process refuses to start

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ContractConfig, MintConfig, Network, NetworkConfig, ObservabilityConfig, WalletConfig};
