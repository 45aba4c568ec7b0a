use cc_protocol::ckb_types::bytes::Bytes;
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

pub(crate) const SIGNATURE_PLACEHOLDER_LEN: usize = 65;

pub struct Secp256k1Blake160SighashAllHandler {
    cell_dep: CellDep,
    code_hash: H256,
}

impl Secp256k1Blake160SighashAllHandler {
    pub fn new(network: NetworkType) -> Self {
        let info = SystemScript::Secp256k1Blake160SighashAll.info(network);
        Secp256k1Blake160SighashAllHandler {
            cell_dep: info.cell_dep(),
            code_hash: info.code_hash.clone(),
        }
    }
}

impl ScriptHandler for Secp256k1Blake160SighashAllHandler {
    fn is_match(&self, script: &Script) -> bool {
        script.code_hash().as_slice() == self.code_hash.as_bytes()
    }

    fn build_transaction(
        &self,
        skeleton: &mut TransactionSkeleton,
        script_group: &ScriptGroup,
        _context: &HandlerContext,
    ) -> CcResult<bool> {
        if script_group.group_type != ScriptGroupType::Lock || !self.is_match(&script_group.script)
        {
            return Ok(false);
        }
        let index = canonical_index(script_group)?;
        skeleton.set_witness(
            index,
            WitnessType::Lock,
            Bytes::from(vec![0u8; SIGNATURE_PLACEHOLDER_LEN]),
        )?;
        skeleton.add_cell_dep(self.cell_dep.clone())?;
        log::debug!("[sighash] witness placeholder set at input {}", index);
        Ok(true)
    }
}
