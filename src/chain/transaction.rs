//! Mint transaction building.
//!
//! # Responsibilities
//! - Resolve the configured Move entry point once, at construction
//! - Lay out call arguments in the order the entry point expects
//! - Produce a descriptor the wallet can sign and execute

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::types::{ChainResult, SuiAddress};
use crate::config::schema::ContractConfig;
use crate::config::validation::{parse_object_id, require_non_empty};
use crate::config::ConfigError;
use crate::mint::MintRequest;

/// Fully qualified Move function: `package::module::function`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCallTarget {
    pub package: SuiAddress,
    pub module: String,
    pub function: String,
}

impl fmt::Display for MoveCallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// One argument of a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CallArg {
    /// Reference to an owned or shared object.
    Object(SuiAddress),
    /// Pure UTF-8 string value.
    PureString(String),
    /// Pure address value.
    PureAddress(SuiAddress),
}

/// A single Move call, ready to hand to a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDescriptor {
    pub target: MoveCallTarget,
    pub arguments: Vec<CallArg>,
}

/// Builds mint calls against a fixed entry point and capability object.
#[derive(Debug, Clone)]
pub struct MintTxBuilder {
    target: MoveCallTarget,
    mint_cap: SuiAddress,
}

impl MintTxBuilder {
    /// Create a builder from the contract configuration.
    ///
    /// Missing or malformed identifiers are a configuration error; nothing is
    /// deferred to build time.
    pub fn new(contract: &ContractConfig) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        let package = parse_object_id(&mut errors, "contract.package_id", contract.package_id.as_deref());
        let mint_cap = parse_object_id(&mut errors, "contract.mint_cap_id", contract.mint_cap_id.as_deref());
        let module = require_non_empty(&mut errors, "contract.module", &contract.module);
        let function = require_non_empty(&mut errors, "contract.function", &contract.function);

        match (package, mint_cap) {
            (Some(package), Some(mint_cap)) if errors.is_empty() => Ok(Self {
                target: MoveCallTarget {
                    package,
                    module: module.to_string(),
                    function: function.to_string(),
                },
                mint_cap,
            }),
            _ => Err(ConfigError::Validation(errors)),
        }
    }

    pub fn target(&self) -> &MoveCallTarget {
        &self.target
    }

    /// Build the mint call for a normalized request.
    ///
    /// `recipient` is the already resolved address: the request's own recipient,
    /// or the connected account when the request has none.
    pub fn build(&self, request: &MintRequest, recipient: &str) -> ChainResult<TransactionDescriptor> {
        let recipient: SuiAddress = recipient.parse()?;

        Ok(TransactionDescriptor {
            target: self.target.clone(),
            arguments: vec![
                CallArg::Object(self.mint_cap.clone()),
                CallArg::PureString(request.name.clone()),
                CallArg::PureString(request.description.clone()),
                CallArg::PureString(request.image_url.clone()),
                CallArg::PureAddress(recipient),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ContractConfig {
        ContractConfig {
            package_id: Some("0xa11ce".to_string()),
            mint_cap_id: Some("0xca9".to_string()),
            ..ContractConfig::default()
        }
    }

    fn request(recipient: Option<&str>) -> MintRequest {
        MintRequest {
            name: "My NFT".to_string(),
            description: "An awesome NFT on Sui blockchain".to_string(),
            image_url: "https://example.com/nft.png".to_string(),
            recipient: recipient.map(str::to_string),
        }
    }

    #[test]
    fn test_argument_order() {
        let builder = MintTxBuilder::new(&contract()).unwrap();
        let tx = builder.build(&request(None), "0xbeef").unwrap();

        assert!(tx.target.to_string().ends_with("a11ce::nft::mint"));
        assert_eq!(tx.arguments.len(), 5);
        assert_eq!(tx.arguments[0], CallArg::Object("0xca9".parse().unwrap()));
        assert_eq!(tx.arguments[1], CallArg::PureString("My NFT".into()));
        assert_eq!(
            tx.arguments[2],
            CallArg::PureString("An awesome NFT on Sui blockchain".into())
        );
        assert_eq!(
            tx.arguments[3],
            CallArg::PureString("https://example.com/nft.png".into())
        );
        assert_eq!(tx.arguments[4], CallArg::PureAddress("0xbeef".parse().unwrap()));
    }

    #[test]
    fn test_missing_configuration_is_fatal() {
        let mut config = contract();
        config.mint_cap_id = None;
        let err = MintTxBuilder::new(&config).unwrap_err();
        assert!(err.to_string().contains("contract.mint_cap_id: is required"));

        let mut config = contract();
        config.package_id = Some(String::new());
        assert!(MintTxBuilder::new(&config).is_err());
    }

    #[test]
    fn test_builder_reports_same_problems_as_config_validation() {
        let mut config = crate::config::MintConfig::default();
        config.contract.package_id = Some("pkg".to_string());
        config.contract.function = "  ".to_string();

        let from_config = crate::config::validation::validate_config(&config).unwrap_err();
        match MintTxBuilder::new(&config.contract).unwrap_err() {
            ConfigError::Validation(from_builder) => assert_eq!(from_builder, from_config),
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_invalid_recipient() {
        let builder = MintTxBuilder::new(&contract()).unwrap();
        assert!(builder.build(&request(None), "0xnothex").is_err());
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let builder = MintTxBuilder::new(&contract()).unwrap();
        let tx = builder.build(&request(None), "0x1").unwrap();
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["target"]["module"], "nft");
        assert_eq!(json["arguments"][0]["type"], "object");
        assert_eq!(json["arguments"][1]["type"], "pureString");
        assert_eq!(json["arguments"][1]["value"], "My NFT");
        assert_eq!(json["arguments"][4]["type"], "pureAddress");
    }
}
