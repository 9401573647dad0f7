//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{MintConfig, Network};
use crate::config::validation::ValidationError;

pub const NETWORK_ENV_VAR: &str = "SUI_NETWORK";
pub const FULLNODE_URL_ENV_VAR: &str = "SUI_FULLNODE_URL";
pub const PACKAGE_ID_ENV_VAR: &str = "SUI_PACKAGE_ID";
pub const MINT_CAP_ID_ENV_VAR: &str = "SUI_MINT_CAP_ID";
pub const WALLET_BRIDGE_ENV_VAR: &str = "SUI_WALLET_BRIDGE_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read a TOML file without validating it. A missing path yields the defaults.
pub fn read_config(path: Option<&Path>) -> Result<MintConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)
        }
        None => Ok(MintConfig::default()),
    }
}

/// Overlay environment variables onto a configuration.
///
/// `lookup` abstracts the environment so callers (and tests) can supply their own.
pub fn apply_env_overrides<F>(config: &mut MintConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(NETWORK_ENV_VAR) {
        config.network.network = raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to {}", Network::Testnet);
            Network::Testnet
        });
    }
    if let Some(url) = lookup(FULLNODE_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.network.fullnode_url = Some(url);
    }
    if let Some(id) = lookup(PACKAGE_ID_ENV_VAR) {
        config.contract.package_id = Some(id);
    }
    if let Some(id) = lookup(MINT_CAP_ID_ENV_VAR) {
        config.contract.mint_cap_id = Some(id);
    }
    if let Some(url) = lookup(WALLET_BRIDGE_ENV_VAR) {
        config.wallet.bridge_url = url;
    }
}

/// Read `path`, overlay the environment, then apply caller overrides.
///
/// Precedence, lowest first: defaults, file, environment, `overrides`. The result
/// is not validated; commands that need a complete contract call
/// [`validate_config`](crate::config::validation::validate_config) themselves.
pub fn load_config<F, O>(path: Option<&Path>, lookup: F, overrides: O) -> Result<MintConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    O: FnOnce(&mut MintConfig),
{
    let mut config = read_config(path)?;
    apply_env_overrides(&mut config, lookup);
    overrides(&mut config);
    Ok(config)
}
