//! Shared fakes and mock servers for integration tests.

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::watch;

use nft_mint::chain::{
    ChainError, ChainResult, ExecutionResult, FinalityProvider, FinalityReport, MintTxBuilder,
    SuiAddress, TransactionDescriptor, TransactionDigest, WalletAdapter,
};
use nft_mint::config::ContractConfig;
use nft_mint::mint::{MintState, MintStatus, MintWorkflow};

pub const PACKAGE_ID: &str = "0x5ca1ab1e";
pub const MINT_CAP_ID: &str = "0xca9ca9";
pub const ACCOUNT: &str = "0xa11ce";

pub fn contract() -> ContractConfig {
    ContractConfig {
        package_id: Some(PACKAGE_ID.to_string()),
        mint_cap_id: Some(MINT_CAP_ID.to_string()),
        ..ContractConfig::default()
    }
}

pub fn workflow(wallet: Arc<FakeWallet>, finality: Arc<FakeFinality>) -> MintWorkflow {
    let builder = MintTxBuilder::new(&contract()).expect("test contract is valid");
    MintWorkflow::new(builder, wallet, finality)
}

/// Records the workflow status seen from inside a fake at call time.
#[derive(Default)]
struct Probe {
    rx: Mutex<Option<watch::Receiver<MintState>>>,
    seen: Mutex<Vec<MintStatus>>,
}

impl Probe {
    fn record(&self) {
        if let Some(rx) = self.rx.lock().unwrap().as_ref() {
            let status = rx.borrow().status();
            self.seen.lock().unwrap().push(status);
        }
    }
}

/// Wallet that signs instantly, or rejects with a fixed message.
pub struct FakeWallet {
    account: Mutex<Option<SuiAddress>>,
    reject_with: Option<String>,
    digest: String,
    probe: Probe,
    signed: Mutex<Vec<TransactionDescriptor>>,
}

#[allow(dead_code)]
impl FakeWallet {
    fn build(account: Option<&str>, reject_with: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            account: Mutex::new(account.map(|a| a.parse().unwrap())),
            reject_with: reject_with.map(str::to_string),
            digest: "7nHzbXq1VdC3gWDp3hXyA1KQmE9x".to_string(),
            probe: Probe::default(),
            signed: Mutex::new(Vec::new()),
        })
    }

    pub fn connected(account: &str) -> Arc<Self> {
        Self::build(Some(account), None)
    }

    pub fn disconnected() -> Arc<Self> {
        Self::build(None, None)
    }

    pub fn rejecting(account: &str, message: &str) -> Arc<Self> {
        Self::build(Some(account), Some(message))
    }

    pub fn set_account(&self, account: Option<&str>) {
        *self.account.lock().unwrap() = account.map(|a| a.parse().unwrap());
    }

    pub fn observe(&self, rx: watch::Receiver<MintState>) {
        *self.probe.rx.lock().unwrap() = Some(rx);
    }

    pub fn seen(&self) -> Vec<MintStatus> {
        self.probe.seen.lock().unwrap().clone()
    }

    pub fn signed(&self) -> Vec<TransactionDescriptor> {
        self.signed.lock().unwrap().clone()
    }

    pub fn digest(&self) -> TransactionDigest {
        TransactionDigest(self.digest.clone())
    }
}

#[async_trait]
impl WalletAdapter for FakeWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.account.lock().unwrap().clone()
    }

    fn is_connecting(&self) -> bool {
        false
    }

    async fn sign_and_execute(&self, tx: &TransactionDescriptor) -> ChainResult<ExecutionResult> {
        tokio::task::yield_now().await;
        self.probe.record();
        self.signed.lock().unwrap().push(tx.clone());

        match &self.reject_with {
            Some(message) => Err(ChainError::Wallet(message.clone())),
            None => Ok(ExecutionResult {
                digest: TransactionDigest(self.digest.clone()),
            }),
        }
    }
}

/// Finality source that answers immediately.
pub struct FakeFinality {
    fail_with: Mutex<Option<String>>,
    confirmed_local_execution: bool,
    probe: Probe,
    calls: Mutex<Vec<TransactionDigest>>,
}

#[allow(dead_code)]
impl FakeFinality {
    pub fn confirming(confirmed_local_execution: bool) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Mutex::new(None),
            confirmed_local_execution,
            probe: Probe::default(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let finality = Self::confirming(false);
        finality.fail_next(Some(message));
        finality
    }

    pub fn fail_next(&self, message: Option<&str>) {
        *self.fail_with.lock().unwrap() = message.map(str::to_string);
    }

    pub fn observe(&self, rx: watch::Receiver<MintState>) {
        *self.probe.rx.lock().unwrap() = Some(rx);
    }

    pub fn seen(&self) -> Vec<MintStatus> {
        self.probe.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<TransactionDigest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FinalityProvider for FakeFinality {
    async fn wait_for_finality(&self, digest: &TransactionDigest) -> ChainResult<FinalityReport> {
        tokio::task::yield_now().await;
        self.probe.record();
        self.calls.lock().unwrap().push(digest.clone());

        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(ChainError::Rpc(message)),
            None => Ok(FinalityReport {
                confirmed_local_execution: self.confirmed_local_execution,
            }),
        }
    }
}

/// Serve a router on an ephemeral local port.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

#[derive(Clone)]
struct NodeState {
    calls: Arc<AtomicU32>,
    /// `sui_getTransactionBlock` fails this many times before succeeding.
    pending_polls: u32,
}

/// Start a JSON-RPC full node stand-in.
///
/// Returns its address and a counter of `sui_getTransactionBlock` calls.
#[allow(dead_code)]
pub async fn spawn_mock_node(pending_polls: u32) -> (SocketAddr, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let state = NodeState {
        calls: calls.clone(),
        pending_polls,
    };
    let router = Router::new().route("/", post(node_handler)).with_state(state);
    (spawn_router(router).await, calls)
}

async fn node_handler(State(state): State<NodeState>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let reply = match req["method"].as_str() {
        Some("sui_getChainIdentifier") => json!({ "jsonrpc": "2.0", "id": id, "result": "4c78adac" }),
        Some("sui_getTransactionBlock") => {
            let n = state.calls.fetch_add(1, Ordering::SeqCst);
            if n < state.pending_polls {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": { "code": -32602, "message": "Could not find the referenced transaction" }
                })
            } else {
                let digest = req["params"][0].clone();
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {
                        "digest": digest,
                        "confirmedLocalExecution": true
                    }
                })
            }
        }
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "Method not found" }
        }),
    };
    Json(reply)
}

#[derive(Clone)]
struct BridgeState {
    address: Option<String>,
    reject_with: Option<String>,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Start a wallet bridge stand-in. Returns its address and the bodies it received.
#[allow(dead_code)]
pub async fn spawn_mock_bridge(
    address: Option<&str>,
    reject_with: Option<&str>,
) -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = BridgeState {
        address: address.map(str::to_string),
        reject_with: reject_with.map(str::to_string),
        requests: requests.clone(),
    };
    let router = Router::new()
        .route("/account", get(account_handler))
        .route("/sign-and-execute", post(sign_handler))
        .with_state(state);
    (spawn_router(router).await, requests)
}

async fn account_handler(State(state): State<BridgeState>) -> Json<Value> {
    Json(json!({ "address": state.address }))
}

async fn sign_handler(State(state): State<BridgeState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body);
    match state.reject_with {
        Some(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        None => Json(json!({ "digest": "Dx9bridge" })).into_response(),
    }
}
