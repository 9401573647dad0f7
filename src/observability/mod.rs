//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! workflow, chain client, wallet bridge produce:
//!     → logging.rs (structured log events, one span per mint attempt)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Every attempt carries a UUID correlation id in its span
//! - The library never installs a metrics exporter itself

pub mod logging;
pub mod metrics;
