//! Mint submission workflow.
//!
//! # State Machine
//! ```text
//!            submit()                wallet ok              final
//!   Idle ──────────────▶ Signing ─────────────▶ Submitting ───────▶ Finalized
//!                           │                        │
//!                           │ no account / rejected  │ timeout / RPC error
//!                           ▼                        ▼
//!                         Failed ◀───────────────────┘
//! ```
//! A new `submit()` from `Idle`, `Failed` or `Finalized` goes straight to `Signing`.
//! `submit` borrows the workflow mutably, so one instance runs one attempt at a time.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::chain::client::FinalityProvider;
use crate::chain::transaction::MintTxBuilder;
use crate::chain::types::{ChainError, TransactionDigest};
use crate::chain::wallet::WalletAdapter;
use crate::mint::validation::MintRequest;
use crate::observability::metrics;

/// Phase of the current attempt, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStatus {
    Idle,
    Signing,
    Submitting,
    Finalized,
    Error,
}

impl MintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MintStatus::Idle => "idle",
            MintStatus::Signing => "signing",
            MintStatus::Submitting => "submitting",
            MintStatus::Finalized => "finalized",
            MintStatus::Error => "error",
        }
    }
}

impl fmt::Display for MintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a finalized mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub digest: TransactionDigest,
    pub confirmed_local_execution: bool,
}

/// Workflow state. Each variant carries only the data valid in that phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MintState {
    #[default]
    Idle,
    Signing,
    Submitting {
        digest: TransactionDigest,
    },
    Finalized(MintResponse),
    Failed {
        message: String,
    },
}

impl MintState {
    pub fn status(&self) -> MintStatus {
        match self {
            MintState::Idle => MintStatus::Idle,
            MintState::Signing => MintStatus::Signing,
            MintState::Submitting { .. } => MintStatus::Submitting,
            MintState::Finalized(_) => MintStatus::Finalized,
            MintState::Failed { .. } => MintStatus::Error,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MintState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn last_response(&self) -> Option<&MintResponse> {
        match self {
            MintState::Finalized(response) => Some(response),
            _ => None,
        }
    }

    /// True while the wallet or the node is being waited on.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, MintState::Signing | MintState::Submitting { .. })
    }

    /// Status panel line shown to the user.
    pub fn helper_text(&self) -> &str {
        match self {
            MintState::Idle => "Fill in the metadata to mint your NFT on Sui.",
            MintState::Signing => "Please sign the transaction using your wallet.",
            MintState::Submitting { .. } => "Transaction submitted. Waiting for finality...",
            MintState::Finalized(_) => "NFT minted successfully! View it in your wallet.",
            MintState::Failed { message } if !message.is_empty() => message.as_str(),
            MintState::Failed { .. } => "Something went wrong.",
        }
    }
}

/// Why a mint attempt failed.
#[derive(Debug, Error)]
pub enum MintError {
    /// No wallet account to sign with.
    #[error("Connect your Sui wallet to continue.")]
    ConnectionRequired,

    /// The resolved recipient is not a usable address.
    #[error("{0}")]
    Build(ChainError),

    /// The wallet rejected or failed to sign and execute.
    #[error("{0}")]
    Signing(ChainError),

    /// The transaction was submitted but finality could not be confirmed.
    #[error("{0}")]
    Finality(ChainError),
}

impl MintError {
    /// Short label for metrics and logs.
    pub fn stage(&self) -> &'static str {
        match self {
            MintError::ConnectionRequired => "connection_required",
            MintError::Build(_) => "build_failed",
            MintError::Signing(_) => "signing_failed",
            MintError::Finality(_) => "finality_failed",
        }
    }
}

/// Drives one mint attempt at a time through sign, submit and finality.
pub struct MintWorkflow {
    builder: MintTxBuilder,
    wallet: Arc<dyn WalletAdapter>,
    finality: Arc<dyn FinalityProvider>,
    state: watch::Sender<MintState>,
}

impl MintWorkflow {
    pub fn new(
        builder: MintTxBuilder,
        wallet: Arc<dyn WalletAdapter>,
        finality: Arc<dyn FinalityProvider>,
    ) -> Self {
        let (state, _) = watch::channel(MintState::Idle);
        Self {
            builder,
            wallet,
            finality,
            state,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> MintState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> MintStatus {
        self.state.borrow().status()
    }

    /// Message of the last failure, cleared when a new attempt starts.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    pub fn last_response(&self) -> Option<MintResponse> {
        self.state.borrow().last_response().cloned()
    }

    pub fn is_minting(&self) -> bool {
        self.state.borrow().is_in_flight()
    }

    /// Observe state changes as they happen.
    pub fn subscribe(&self) -> watch::Receiver<MintState> {
        self.state.subscribe()
    }

    /// Run one mint attempt.
    ///
    /// On failure the state becomes `Failed` with the error's message and the same
    /// error is returned, so callers can react without inspecting state.
    pub async fn submit(&mut self, request: &MintRequest) -> Result<MintResponse, MintError> {
        let attempt = Uuid::new_v4();
        let span = tracing::info_span!("mint", %attempt);
        self.attempt(request).instrument(span).await
    }

    async fn attempt(&mut self, request: &MintRequest) -> Result<MintResponse, MintError> {
        let started = Instant::now();

        match self.drive(request).await {
            Ok(response) => {
                metrics::record_mint_outcome("finalized", started.elapsed());
                tracing::info!(digest = %response.digest, "Mint finalized");
                Ok(response)
            }
            Err(e) => {
                metrics::record_mint_outcome(e.stage(), started.elapsed());
                tracing::warn!(stage = e.stage(), error = %e, "Mint failed");
                self.transition(MintState::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn drive(&mut self, request: &MintRequest) -> Result<MintResponse, MintError> {
        let account = self
            .wallet
            .current_account()
            .ok_or(MintError::ConnectionRequired)?;

        self.transition(MintState::Signing);

        let recipient = request
            .recipient
            .clone()
            .unwrap_or_else(|| account.to_string());
        let tx = self
            .builder
            .build(request, &recipient)
            .map_err(MintError::Build)?;

        tracing::info!(
            sender = %account,
            recipient = %recipient,
            target = %tx.target,
            "Requesting signature"
        );

        let execution = self
            .wallet
            .sign_and_execute(&tx)
            .await
            .map_err(MintError::Signing)?;

        self.transition(MintState::Submitting {
            digest: execution.digest.clone(),
        });

        let report = self
            .finality
            .wait_for_finality(&execution.digest)
            .await
            .map_err(MintError::Finality)?;

        let response = MintResponse {
            digest: execution.digest,
            confirmed_local_execution: report.confirmed_local_execution,
        };
        self.transition(MintState::Finalized(response.clone()));

        Ok(response)
    }

    fn transition(&self, next: MintState) {
        tracing::debug!(from = %self.status(), to = %next.status(), "Mint state change");
        self.state.send_replace(next);
    }
}

impl fmt::Debug for MintWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintWorkflow")
            .field("target", self.builder.target())
            .field("state", &*self.state.borrow())
            .finish()
    }
}
