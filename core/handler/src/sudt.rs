use cc_protocol::ckb_types::packed::{CellDep, Script};
use cc_protocol::ckb_types::prelude::Entity;
use cc_protocol::ckb_types::H256;
use cc_protocol::traits::ScriptHandler;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::script_group::{ScriptGroup, ScriptGroupType};
use cc_protocol::types::system_script::SystemScript;
use cc_protocol::types::transaction::TransactionSkeleton;
use cc_protocol::CcResult;

/// Type script side of sUDT cells: contributes the code dep, never a witness.
pub struct SudtHandler {
    cell_dep: CellDep,
    code_hash: H256,
}

impl SudtHandler {
    pub fn new(network: NetworkType) -> Self {
        let info = SystemScript::Sudt.info(network);
        SudtHandler {
            cell_dep: info.cell_dep(),
            code_hash: info.code_hash.clone(),
        }
    }
}

impl ScriptHandler for SudtHandler {
    fn is_match(&self, script: &Script) -> bool {
        script.code_hash().as_slice() == self.code_hash.as_bytes()
    }

    fn build_transaction(
        &self,
        skeleton: &mut TransactionSkeleton,
        script_group: &ScriptGroup,
        _context: &HandlerContext,
    ) -> CcResult<bool> {
        if script_group.group_type != ScriptGroupType::Type || !self.is_match(&script_group.script)
        {
            return Ok(false);
        }
        skeleton.add_cell_dep(self.cell_dep.clone())?;
        Ok(true)
    }
}
