//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required on-chain identifiers are present and well-formed
//! - Validate value ranges (timeouts > 0, URLs parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MintConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::chain::types::SuiAddress;
use crate::config::schema::MintConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &MintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    parse_object_id(&mut errors, "contract.package_id", config.contract.package_id.as_deref());
    parse_object_id(&mut errors, "contract.mint_cap_id", config.contract.mint_cap_id.as_deref());
    require_non_empty(&mut errors, "contract.module", &config.contract.module);
    require_non_empty(&mut errors, "contract.function", &config.contract.function);

    if let Some(url) = config.network.fullnode_url.as_deref().map(str::trim) {
        if !url.is_empty() {
            if let Err(e) = url::Url::parse(url) {
                errors.push(ValidationError::new(
                    "network.fullnode_url",
                    format!("invalid URL '{}': {}", url, e),
                ));
            }
        }
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.network.finality_timeout_secs == 0 {
        errors.push(ValidationError::new("network.finality_timeout_secs", "must be greater than 0"));
    }
    if config.network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be greater than 0"));
    }

    if let Err(e) = url::Url::parse(&config.wallet.bridge_url) {
        errors.push(ValidationError::new(
            "wallet.bridge_url",
            format!("invalid URL '{}': {}", config.wallet.bridge_url, e),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a required object id, recording a problem under `field` if it is
/// missing or malformed.
pub fn parse_object_id(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<&str>,
) -> Option<SuiAddress> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(ValidationError::new(field, "is required"));
            None
        }
        Some(id) => match id.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                errors.push(ValidationError::new(field, e.to_string()));
                None
            }
        },
    }
}

/// Trimmed `value`, recording a problem under `field` if nothing is left.
pub fn require_non_empty<'a>(errors: &mut Vec<ValidationError>, field: &str, value: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    }
    value
}
