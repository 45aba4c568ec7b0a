use std::convert::TryFrom;

use ckb_types::{H160, H256};
use serde::Deserialize;

use crate::types::multisig::MultisigConfig;
use crate::types::network::NetworkType;
use crate::CcError;

#[derive(Deserialize, Clone, Debug)]
pub struct CcMultisigConfig {
    #[serde(default)]
    pub require_first_n: u8,
    pub threshold: u8,
    pub signers: Vec<H160>,
}

impl TryFrom<&CcMultisigConfig> for MultisigConfig {
    type Error = CcError;

    fn try_from(config: &CcMultisigConfig) -> Result<Self, Self::Error> {
        MultisigConfig::new(
            config.signers.clone(),
            config.require_first_n,
            config.threshold,
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct CcConfig {
    pub network: NetworkType,
    #[serde(default)]
    pub fee_rate: u64,
    pub sender: String,
    pub cells_path: String,
    pub sudt_args: Option<H256>,
    pub multisig: Option<CcMultisigConfig>,
}
