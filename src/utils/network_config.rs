//! Network Configuration
//!
//! zkSync network presets and the serde-loadable domain configuration
//! that selects which `Eip712Domain` digests are bound to.

use crate::eip712::types::{Eip712Domain, Eip712Error, Eip712Result};
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known zkSync networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZkSyncNetwork {
    Mainnet,
    Sepolia,
    Goerli,
    /// Local development node
    Localhost,
}

impl ZkSyncNetwork {
    /// EIP-155 chain id used in the signing domain
    pub fn chain_id(&self) -> u64 {
        match self {
            ZkSyncNetwork::Mainnet => 324,
            ZkSyncNetwork::Sepolia => 300,
            ZkSyncNetwork::Goerli => 280,
            ZkSyncNetwork::Localhost => 42,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        [
            ZkSyncNetwork::Mainnet,
            ZkSyncNetwork::Sepolia,
            ZkSyncNetwork::Goerli,
            ZkSyncNetwork::Localhost,
        ]
        .into_iter()
        .find(|n| n.chain_id() == chain_id)
    }
}

impl fmt::Display for ZkSyncNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZkSyncNetwork::Mainnet => write!(f, "mainnet"),
            ZkSyncNetwork::Sepolia => write!(f, "sepolia"),
            ZkSyncNetwork::Goerli => write!(f, "goerli"),
            ZkSyncNetwork::Localhost => write!(f, "localhost"),
        }
    }
}

impl FromStr for ZkSyncNetwork {
    type Err = Eip712Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(ZkSyncNetwork::Mainnet),
            "sepolia" => Ok(ZkSyncNetwork::Sepolia),
            "goerli" => Ok(ZkSyncNetwork::Goerli),
            "localhost" | "local" => Ok(ZkSyncNetwork::Localhost),
            other => Err(Eip712Error::InvalidConfig(format!("unknown network: {}", other))),
        }
    }
}

/// Domain settings as they appear in a JSON config file.
///
/// Either `network` or `chainId` must be given; unset `name`/`version`
/// fall back to the zkSync defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DomainConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<ZkSyncNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// 0x-prefixed hex address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,
}

impl DomainConfig {
    pub fn from_json(json: &str) -> Eip712Result<Self> {
        serde_json::from_str(json).map_err(|e| Eip712Error::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Eip712Result<String> {
        serde_json::to_string(self).map_err(|e| Eip712Error::InvalidConfig(e.to_string()))
    }

    /// Build the domain, validating the settings
    pub fn into_domain(self) -> Eip712Result<Eip712Domain> {
        let chain_id = match (self.network, self.chain_id) {
            (Some(network), Some(id)) if network.chain_id() != id => {
                return Err(Eip712Error::InvalidConfig(format!(
                    "chainId {} does not match network {} ({})",
                    id,
                    network,
                    network.chain_id()
                )))
            }
            (_, Some(id)) => id,
            (Some(network), None) => network.chain_id(),
            (None, None) => {
                return Err(Eip712Error::InvalidConfig(
                    "either network or chainId is required".to_string(),
                ))
            }
        };

        let verifying_contract = self
            .verifying_contract
            .as_deref()
            .map(parse_address)
            .transpose()?;

        Ok(Eip712Domain::new(
            self.name.unwrap_or_else(|| Eip712Domain::NAME.to_string()),
            self.version.unwrap_or_else(|| Eip712Domain::VERSION.to_string()),
            U256::from(chain_id),
            verifying_contract,
        ))
    }
}

/// Parse a 0x-prefixed, 40 hex digit address
fn parse_address(addr: &str) -> Eip712Result<Address> {
    let digits = addr.strip_prefix("0x").ok_or_else(|| {
        Eip712Error::InvalidConfig(format!("address must be 0x-prefixed: {}", addr))
    })?;

    if digits.len() != 40 {
        return Err(Eip712Error::InvalidConfig(format!(
            "invalid address length: expected 40 hex chars, got {}",
            digits.len()
        )));
    }

    let bytes = hex::decode(digits)
        .map_err(|e| Eip712Error::InvalidConfig(format!("invalid address hex: {}", e)))?;
    Ok(Address::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_chain_ids() {
        assert_eq!(ZkSyncNetwork::Localhost.chain_id(), 42);
        assert_eq!(ZkSyncNetwork::from_chain_id(324), Some(ZkSyncNetwork::Mainnet));
        assert_eq!(ZkSyncNetwork::from_chain_id(1), None);
        assert_eq!("LOCAL".parse::<ZkSyncNetwork>().unwrap(), ZkSyncNetwork::Localhost);
        assert!("ropsten".parse::<ZkSyncNetwork>().is_err());
    }

    #[test]
    fn test_config_from_network() {
        let domain = DomainConfig::from_json(r#"{"network": "localhost"}"#)
            .unwrap()
            .into_domain()
            .unwrap();

        assert_eq!(domain, Eip712Domain::default_domain(ZkSyncNetwork::Localhost));
    }

    #[test]
    fn test_config_with_verifying_contract() {
        let json = r#"{
            "name": "Ether Mail",
            "version": "1",
            "chainId": 1,
            "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
        }"#;
        let domain = DomainConfig::from_json(json).unwrap().into_domain().unwrap();

        assert_eq!(domain.name, "Ether Mail");
        assert_eq!(domain.chain_id, U256::one());
        assert_eq!(domain.verifying_contract, Some(Address::repeat_byte(0xcc)));
    }

    #[test]
    fn test_config_rejects_conflicts() {
        let config = DomainConfig {
            network: Some(ZkSyncNetwork::Mainnet),
            chain_id: Some(280),
            ..Default::default()
        };
        assert!(matches!(config.into_domain(), Err(Eip712Error::InvalidConfig(_))));

        assert!(DomainConfig::default().into_domain().is_err());
    }

    #[test]
    fn test_config_rejects_bad_address() {
        let config = DomainConfig {
            network: Some(ZkSyncNetwork::Localhost),
            verifying_contract: Some("0x1234".to_string()),
            ..Default::default()
        };
        assert!(config.into_domain().is_err());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(DomainConfig::from_json(r#"{"network": "localhost", "salt": "0x00"}"#).is_err());
    }
}
