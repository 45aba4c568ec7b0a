mod acp;
mod error;
mod multisig;
mod registry;
mod sighash;
mod sudt;

#[cfg(test)]
mod tests;

pub use acp::AnyoneCanPayHandler;
pub use error::HandlerError;
pub use multisig::Secp256k1Blake160MultisigAllHandler;
pub use registry::ScriptHandlerRegistry;
pub use sighash::Secp256k1Blake160SighashAllHandler;
pub use sudt::SudtHandler;

use cc_protocol::ckb_types::prelude::Entity;
use cc_protocol::types::hex::Hex;
use cc_protocol::types::script_group::ScriptGroup;
use cc_protocol::CcResult;

fn canonical_index(script_group: &ScriptGroup) -> CcResult<usize> {
    script_group.canonical_index().ok_or_else(|| {
        HandlerError::EmptyScriptGroup(Hex::encode(script_group.script.as_slice())).into()
    })
}
