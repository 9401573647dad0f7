//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of hex digits in a full Sui address or object id.
const ADDRESS_HEX_LEN: usize = 64;

/// A 32-byte Sui address or object id, stored in canonical form
/// (`0x` followed by 64 lowercase hex digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiAddress(String);

impl SuiAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| ChainError::InvalidAddress(format!("'{}' is missing the 0x prefix", s)))?;

        if hex.is_empty() || hex.len() > ADDRESS_HEX_LEN {
            return Err(ChainError::InvalidAddress(format!(
                "'{}' must have between 1 and {} hex digits",
                s, ADDRESS_HEX_LEN
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChainError::InvalidAddress(format!("'{}' is not hex", s)));
        }

        Ok(Self(format!(
            "0x{:0>width$}",
            hex.to_ascii_lowercase(),
            width = ADDRESS_HEX_LEN
        )))
    }
}

impl TryFrom<String> for SuiAddress {
    type Error = ChainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SuiAddress> for String {
    fn from(address: SuiAddress) -> Self {
        address.0
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque transaction identifier returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDigest(pub String);

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionDigest {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What the wallet reports after signing and executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub digest: TransactionDigest,
}

/// What the full node reports once a transaction is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalityReport {
    pub confirmed_local_execution: bool,
}

/// Errors that can occur during chain and wallet operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {code}: {message}")]
    RpcResponse { code: i64, message: String },

    /// Transaction was not finalized within the configured bound.
    #[error("Transaction {digest} not finalized after {secs} seconds")]
    FinalityTimeout { digest: TransactionDigest, secs: u64 },

    /// Malformed address or object id.
    #[error("Invalid Sui address: {0}")]
    InvalidAddress(String),

    /// The wallet refused or failed to sign and execute.
    #[error("{0}")]
    Wallet(String),

    /// Wallet bridge or node not reachable.
    #[error("Not available: {0}")]
    NotAvailable(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_normalization() {
        let address: SuiAddress = "0x1234".parse().unwrap();
        assert_eq!(
            address.as_str(),
            "0x0000000000000000000000000000000000000000000000000000000000001234"
        );

        let upper: SuiAddress = "0xABCD".parse().unwrap();
        assert!(upper.as_str().ends_with("abcd"));
    }

    #[test]
    fn test_address_rejects_malformed() {
        assert!("1234".parse::<SuiAddress>().is_err());
        assert!("0x".parse::<SuiAddress>().is_err());
        assert!("0xzz".parse::<SuiAddress>().is_err());
        assert!(format!("0x{}", "a".repeat(65)).parse::<SuiAddress>().is_err());
        assert!(format!("0x{}", "a".repeat(64)).parse::<SuiAddress>().is_ok());
    }

    #[test]
    fn test_address_serde() {
        let json = serde_json::to_string(&"0x2".parse::<SuiAddress>().unwrap()).unwrap();
        assert!(json.ends_with("2\""));
        assert!(serde_json::from_str::<SuiAddress>("\"nope\"").is_err());
    }

    #[test]
    fn test_finality_report_camel_case() {
        let report: FinalityReport =
            serde_json::from_str(r#"{"confirmedLocalExecution":true}"#).unwrap();
        assert!(report.confirmed_local_execution);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::Wallet("User rejected the request".into());
        assert_eq!(err.to_string(), "User rejected the request");

        let err = ChainError::FinalityTimeout {
            digest: "Dx1".into(),
            secs: 60,
        };
        assert_eq!(err.to_string(), "Transaction Dx1 not finalized after 60 seconds");
    }
}
