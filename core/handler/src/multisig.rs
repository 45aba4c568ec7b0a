use cc_protocol::ckb_types::packed::{CellDep, Script};
use cc_protocol::ckb_types::prelude::Entity;
use cc_protocol::ckb_types::H256;
use cc_protocol::log;
use cc_protocol::traits::ScriptHandler;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::script_group::{ScriptGroup, ScriptGroupType};
use cc_protocol::types::system_script::SystemScript;
use cc_protocol::types::transaction::{TransactionSkeleton, WitnessType};
use cc_protocol::CcResult;

use crate::canonical_index;

/// Claims multisig lock groups, but only when a `HandlerContext::Multisig`
/// describes the signer set.
pub struct Secp256k1Blake160MultisigAllHandler {
    cell_dep: CellDep,
    code_hash: H256,
}

impl Secp256k1Blake160MultisigAllHandler {
    pub fn new(network: NetworkType) -> Self {
        let info = SystemScript::Secp256k1Blake160MultisigAll.info(network);
        Secp256k1Blake160MultisigAllHandler {
            cell_dep: info.cell_dep(),
            code_hash: info.code_hash.clone(),
        }
    }
}

impl ScriptHandler for Secp256k1Blake160MultisigAllHandler {
    fn is_match(&self, script: &Script) -> bool {
        script.code_hash().as_slice() == self.code_hash.as_bytes()
    }

    fn build_transaction(
        &self,
        skeleton: &mut TransactionSkeleton,
        script_group: &ScriptGroup,
        context: &HandlerContext,
    ) -> CcResult<bool> {
        if script_group.group_type != ScriptGroupType::Lock || !self.is_match(&script_group.script)
        {
            return Ok(false);
        }
        let config = match context {
            HandlerContext::Multisig(config) => config,
            HandlerContext::NoContext => return Ok(false),
        };
        let index = canonical_index(script_group)?;
        skeleton.set_witness(index, WitnessType::Lock, config.placeholder_witness_lock())?;
        skeleton.add_cell_dep(self.cell_dep.clone())?;
        log::debug!(
            "[multisig] {}-of-{} placeholder set at input {}",
            config.threshold(),
            config.signers().len(),
            index
        );
        Ok(true)
    }
}
