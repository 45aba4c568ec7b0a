use ckb_types::packed::Script;

use crate::types::network::NetworkType;
use crate::CcResult;

/// Turns address text into the lock script it encodes.
pub trait AddressResolver {
    fn decode(&self, address: &str) -> CcResult<(Script, NetworkType)>;
}
