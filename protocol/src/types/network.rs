use std::fmt;

use ckb_sdk::NetworkType as SdkNetworkType;
use serde::{Deserialize, Serialize};

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl From<NetworkType> for SdkNetworkType {
    fn from(network: NetworkType) -> SdkNetworkType {
        match network {
            NetworkType::Mainnet => SdkNetworkType::Mainnet,
            NetworkType::Testnet => SdkNetworkType::Testnet,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
        }
    }
}
