//! Sui JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a full node JSON-RPC endpoint
//! - Query transaction blocks and the chain identifier
//! - Wait for finality of a submitted transaction
//! - Provide health check for node connectivity

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::chain::types::{ChainError, ChainResult, FinalityReport, TransactionDigest};
use crate::config::NetworkConfig;
use crate::observability::metrics;

/// Something that can tell when a transaction is final.
#[async_trait]
pub trait FinalityProvider: Send + Sync {
    async fn wait_for_finality(&self, digest: &TransactionDigest) -> ChainResult<FinalityReport>;
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

/// Subset of `SuiTransactionBlockResponse` this client reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: TransactionDigest,
    #[serde(default)]
    pub confirmed_local_execution: Option<bool>,
}

/// Sui full node client.
#[derive(Clone)]
pub struct SuiClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: Arc<AtomicU64>,
    finality_timeout: Duration,
    poll_interval: Duration,
}

impl SuiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Network configuration; the endpoint comes from
    ///   [`NetworkConfig::resolve_rpc_url`]
    pub fn new(config: &NetworkConfig) -> ChainResult<Self> {
        let rpc_url = config.resolve_rpc_url();
        url::Url::parse(&rpc_url)
            .map_err(|e| ChainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        for (field, value) in [
            ("rpc_timeout_secs", config.rpc_timeout_secs),
            ("finality_timeout_secs", config.finality_timeout_secs),
            ("poll_interval_ms", config.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ChainError::Rpc(format!("{} must be greater than 0", field)));
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.rpc_timeout_secs))
            .build()
            .map_err(|e| ChainError::Rpc(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(
            rpc_url = %rpc_url,
            network = %config.network,
            "Sui client initialized"
        );

        Ok(Self {
            http,
            rpc_url,
            next_id: Arc::new(AtomicU64::new(1)),
            finality_timeout: Duration::from_secs(config.finality_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Issue one JSON-RPC call and decode its result.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> ChainResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let res = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("{} failed: {}", method, e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ChainError::Rpc(format!("{} returned HTTP {}", method, status)));
        }

        let envelope: RpcResponse = res
            .json()
            .await
            .map_err(|e| ChainError::Rpc(format!("{} returned malformed JSON: {}", method, e)))?;

        if let Some(err) = envelope.error {
            return Err(ChainError::RpcResponse {
                code: err.code,
                message: err.message,
            });
        }

        let result = envelope
            .result
            .ok_or_else(|| ChainError::Rpc(format!("{} returned no result", method)))?;
        serde_json::from_value(result)
            .map_err(|e| ChainError::Rpc(format!("{} returned unexpected result: {}", method, e)))
    }

    /// Get the chain identifier of the connected node.
    pub async fn get_chain_identifier(&self) -> ChainResult<String> {
        self.call("sui_getChainIdentifier", json!([])).await
    }

    /// Fetch a transaction block by digest.
    pub async fn get_transaction_block(
        &self,
        digest: &TransactionDigest,
    ) -> ChainResult<TransactionBlockResponse> {
        self.call("sui_getTransactionBlock", json!([digest.0])).await
    }

    /// Check if the node is reachable.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_chain_identifier().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }
}

#[async_trait]
impl FinalityProvider for SuiClient {
    /// Poll the node until the transaction is known, or the finality bound elapses.
    ///
    /// Errors while polling (not yet indexed, transient node failures) are retried.
    async fn wait_for_finality(&self, digest: &TransactionDigest) -> ChainResult<FinalityReport> {
        let result = timeout(self.finality_timeout, async {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match self.get_transaction_block(digest).await {
                    Ok(block) => {
                        return FinalityReport {
                            confirmed_local_execution: block.confirmed_local_execution.unwrap_or(false),
                        };
                    }
                    Err(e) => {
                        tracing::debug!(digest = %digest, error = %e, "Transaction not final yet");
                    }
                }
            }
        })
        .await;

        match result {
            Ok(report) => {
                tracing::info!(
                    digest = %digest,
                    confirmed_local_execution = report.confirmed_local_execution,
                    "Transaction finalized"
                );
                Ok(report)
            }
            Err(_) => Err(ChainError::FinalityTimeout {
                digest: digest.clone(),
                secs: self.finality_timeout.as_secs(),
            }),
        }
    }
}

impl std::fmt::Debug for SuiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiClient")
            .field("rpc_url", &self.rpc_url)
            .field("finality_timeout", &self.finality_timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
