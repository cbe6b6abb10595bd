//! Namada network definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol of the chain's native token
pub const NATIVE_TOKEN_SYMBOL: &str = "NAM";

/// Longest chain identifier accepted (Tendermint limit)
const MAX_CHAIN_ID_LENGTH: usize = 50;

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Mainnet
    Mainnet,
    /// Public testnet
    Testnet,
    /// Local development chain
    Localnet,
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "localnet" => Ok(Self::Localnet),
            other => Err(Error::InvalidNetwork(other.to_string())),
        }
    }
}

/// Chain identifier (e.g. `namada.5f5de2dd1b88cba30586420`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId(String);

impl ChainId {
    /// Parse and validate a chain identifier
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidChainId("chain ID cannot be empty".to_string()));
        }
        if id.len() > MAX_CHAIN_ID_LENGTH {
            return Err(Error::InvalidChainId(format!(
                "chain ID is {} characters, maximum is {}",
                id.len(),
                MAX_CHAIN_ID_LENGTH
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(Error::InvalidChainId(format!("'{}' contains whitespace", id)));
        }
        Ok(Self(id))
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChainId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chain parameters as reported by the node (or configured locally)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParameters {
    /// Network type
    pub network_type: NetworkType,
    /// Chain ID, absent until the node has been queried
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    /// Display symbol of the native token
    pub native_token_symbol: String,
}

impl ChainParameters {
    /// Mainnet parameters
    pub fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            chain_id: Some(ChainId("namada.5f5de2dd1b88cba30586420".to_string())),
            native_token_symbol: NATIVE_TOKEN_SYMBOL.to_string(),
        }
    }

    /// Testnet parameters (chain ID rotates, so it must be fetched)
    pub fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            chain_id: None,
            native_token_symbol: NATIVE_TOKEN_SYMBOL.to_string(),
        }
    }

    /// Local development chain parameters
    pub fn localnet() -> Self {
        Self {
            network_type: NetworkType::Localnet,
            chain_id: None,
            native_token_symbol: NATIVE_TOKEN_SYMBOL.to_string(),
        }
    }

    /// Get parameters by network type
    pub fn from_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
            NetworkType::Localnet => Self::localnet(),
        }
    }

    /// Replace the chain ID once it is known
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Check whether `symbol` names the native token
    pub fn is_native_symbol(&self, symbol: &str) -> bool {
        self.native_token_symbol.eq_ignore_ascii_case(symbol)
    }
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_params() {
        let params = ChainParameters::mainnet();
        assert_eq!(params.network_type, NetworkType::Mainnet);
        assert!(params.chain_id.is_some());
        assert!(params.is_native_symbol("nam"));
    }

    #[test]
    fn test_params_from_type() {
        let params = ChainParameters::from_type(NetworkType::Testnet);
        assert_eq!(params.network_type, NetworkType::Testnet);
        assert!(params.chain_id.is_none());
    }

    #[test]
    fn test_chain_id_validation() {
        assert!(ChainId::new("").is_err());
        assert!(ChainId::new("local net").is_err());
        assert!(ChainId::new("x".repeat(51)).is_err());
        assert_eq!(ChainId::new("local.abc123").unwrap().as_str(), "local.abc123");
    }

    #[test]
    fn test_network_type_parse() {
        assert_eq!("Mainnet".parse::<NetworkType>().unwrap(), NetworkType::Mainnet);
        assert!("devnet".parse::<NetworkType>().is_err());
    }

    #[test]
    fn test_params_serde() {
        let params = ChainParameters::localnet().with_chain_id(ChainId::new("local.1").unwrap());
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"chainId\":\"local.1\""));
        let back: ChainParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);

        let bad = r#"{"networkType":"mainnet","chainId":"","nativeTokenSymbol":"NAM"}"#;
        assert!(serde_json::from_str::<ChainParameters>(bad).is_err());
    }
}
