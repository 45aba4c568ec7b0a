use std::str::FromStr;

use cc_protocol::ckb_sdk::{Address, AddressPayload, NetworkType as SdkNetworkType};
use cc_protocol::ckb_types::core::ScriptHashType;
use cc_protocol::ckb_types::packed::Script;
use cc_protocol::ckb_types::prelude::Unpack;
use cc_protocol::log;
use cc_protocol::traits::AddressResolver;
use cc_protocol::types::network::NetworkType;
use cc_protocol::CcResult;


mod error;
pub use error::AddressError;

/// Decodes CKB addresses into lock scripts through `ckb_sdk::Address`.
#[derive(Default, Clone, Copy, Debug)]
pub struct CkbAddressResolver;

impl AddressResolver for CkbAddressResolver {
    fn decode(&self, address: &str) -> CcResult<(Script, NetworkType)> {
        let ckb_address = Address::from_str(address)
            .map_err(|reason| AddressError::InvalidAddressFormat(address.into(), reason))?;
        let network = match ckb_address.network() {
            SdkNetworkType::Mainnet => NetworkType::Mainnet,
            SdkNetworkType::Testnet => NetworkType::Testnet,
            other => return Err(AddressError::UnsupportedNetwork(format!("{:?}", other)).into()),
        };
        let script: Script = ckb_address.payload().into();
        log::debug!("decoded {} address {}", network, address);
        Ok((script, network))
    }
}

/// Encodes `script` as a full-format (bech32m) address.
pub fn encode_full_address(script: &Script, network: NetworkType) -> CcResult<String> {
    let hash_type = ScriptHashType::try_from(script.hash_type()).map_err(|err| {
        AddressError::InvalidAddressFormat(network.to_string(), err.to_string())
    })?;
    let payload = AddressPayload::new_full(hash_type, script.code_hash(), script.args().unpack());
    Ok(Address::new(network.into(), payload, true).to_string())
}
