//! Wallet access and transaction signing.
//!
//! # Security
//! - Keys never enter this process; the wallet signs on our behalf
//! - The connected account is a snapshot owned by the wallet, read per attempt

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::chain::transaction::TransactionDescriptor;
use crate::chain::types::{ChainError, ChainResult, ExecutionResult, SuiAddress};
use crate::config::WalletConfig;

/// A wallet able to report its account and sign-and-execute transactions.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Currently connected account, if any.
    fn current_account(&self) -> Option<SuiAddress>;

    /// True while a connection attempt is in progress.
    fn is_connecting(&self) -> bool;

    /// Ask the wallet to sign the transaction and submit it to the network.
    async fn sign_and_execute(&self, tx: &TransactionDescriptor) -> ChainResult<ExecutionResult>;
}

/// Human-readable connection status line.
pub fn wallet_status_text(wallet: &dyn WalletAdapter) -> String {
    if wallet.is_connecting() {
        return "Connecting wallet...".to_string();
    }
    match wallet.current_account() {
        Some(address) => format!("Connected: {}", shorten_address(address.as_str())),
        None => "Wallet not connected".to_string(),
    }
}

/// `0x1234...abcd` style shortening: first 6 and last 4 characters.
pub fn shorten_address(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 10 {
        return value.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteOptions {
    show_effects: bool,
}

#[derive(Debug, Serialize)]
struct SignAndExecuteRequest<'a> {
    transaction: &'a TransactionDescriptor,
    options: ExecuteOptions,
}

/// Wallet reached through a local HTTP bridge.
///
/// The bridge owns the keys and the user-facing approval prompt; this type only
/// relays descriptors and caches the last account snapshot it was given.
#[derive(Debug)]
pub struct BridgeWallet {
    client: reqwest::Client,
    base_url: String,
    account: RwLock<Option<SuiAddress>>,
    connecting: AtomicBool,
}

impl BridgeWallet {
    /// Create a bridge wallet. No request is made until [`BridgeWallet::connect`].
    pub fn new(config: &WalletConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
            account: RwLock::new(None),
            connecting: AtomicBool::new(false),
        }
    }

    /// Fetch the account currently selected in the wallet.
    pub async fn connect(&self) -> ChainResult<Option<SuiAddress>> {
        let result = {
            let _connecting = ConnectingGuard::set(&self.connecting);
            self.fetch_account().await
        };

        let account = result?;
        match &account {
            Some(address) => tracing::info!(address = %address, "Wallet connected"),
            None => tracing::info!("Wallet bridge reachable but no account selected"),
        }
        self.set_account(account.clone());
        Ok(account)
    }

    /// Forget the current account snapshot.
    pub fn disconnect(&self) {
        self.set_account(None);
        tracing::info!("Wallet disconnected");
    }

    async fn fetch_account(&self) -> ChainResult<Option<SuiAddress>> {
        let res = self
            .client
            .get(format!("{}/account", self.base_url))
            .send()
            .await
            .map_err(|e| ChainError::NotAvailable(format!("wallet bridge unreachable: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ChainError::NotAvailable(format!(
                "wallet bridge returned status {}",
                status
            )));
        }

        let body: AccountResponse = res
            .json()
            .await
            .map_err(|e| ChainError::Wallet(format!("Malformed account response: {}", e)))?;

        body.address.map(|a| a.parse()).transpose()
    }

    fn set_account(&self, account: Option<SuiAddress>) {
        let mut guard = self.account.write().unwrap_or_else(|p| p.into_inner());
        *guard = account;
    }
}

/// Holds the `connecting` flag up for as long as it lives, including when the
/// connect future is dropped midway.
struct ConnectingGuard<'a>(&'a AtomicBool);

impl<'a> ConnectingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletAdapter for BridgeWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.account.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::SeqCst)
    }

    async fn sign_and_execute(&self, tx: &TransactionDescriptor) -> ChainResult<ExecutionResult> {
        tracing::debug!(target_fn = %tx.target, "Requesting wallet signature");

        let res = self
            .client
            .post(format!("{}/sign-and-execute", self.base_url))
            .json(&SignAndExecuteRequest {
                transaction: tx,
                options: ExecuteOptions { show_effects: true },
            })
            .send()
            .await
            .map_err(|e| ChainError::NotAvailable(format!("wallet bridge unreachable: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("Wallet returned status {}", status)
            } else {
                text.trim().to_string()
            };
            return Err(ChainError::Wallet(message));
        }

        res.json()
            .await
            .map_err(|e| ChainError::Wallet(format!("Malformed wallet response: {}", e)))
    }
}
