//! Metrics collection.
//!
//! # Metrics
//! - `nft_mint_attempts_total` (counter): attempts by outcome
//! - `nft_mint_duration_seconds` (histogram): time from submit to outcome
//! - `nft_mint_rpc_health` (gauge): 1=reachable, 0=unreachable
//!
//! Without an installed recorder these calls are no-ops.

use std::time::Duration;

/// Record the end of a mint attempt. `outcome` is `finalized` or a failure stage.
pub fn record_mint_outcome(outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!("nft_mint_attempts_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("nft_mint_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

pub fn record_rpc_health(healthy: bool) {
    ::metrics::gauge!("nft_mint_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
