//! Mint submission subsystem.
//!
//! # Data Flow
//! ```text
//! MintFormValues (raw text)
//!     → validation.rs (per-field rules, then trim)
//!     → MintRequest
//!     → workflow.rs (sign → submit → finality, tagged state)
//!     → form.rs (inline errors, reset on success)
//! ```
//!
//! # Design Decisions
//! - Validation is pure and never touches the wallet
//! - Workflow state is one enum, so a finalized mint cannot carry a stale error
//! - Failures are recorded in state and also returned to the caller

pub mod form;
pub mod validation;
pub mod workflow;

pub use form::{FormError, MintForm};
pub use validation::{normalize, parse_form, validate, FieldErrors, FormField, MintFormValues, MintRequest};
pub use workflow::{MintError, MintResponse, MintState, MintStatus, MintWorkflow};
