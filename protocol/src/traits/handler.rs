use ckb_types::packed::Script;

use crate::types::handler::HandlerContext;
use crate::types::script_group::ScriptGroup;
use crate::types::transaction::TransactionSkeleton;
use crate::CcResult;

/// Completes the witness placeholder and cell deps for one script template.
///
/// `build_transaction` returns `Ok(false)` when the group belongs to another
/// handler or `context` lacks what this handler needs, leaving `skeleton`
/// untouched. `Err` is reserved for real failures such as an out-of-range
/// witness index.
pub trait ScriptHandler {
    fn is_match(&self, script: &Script) -> bool;

    fn build_transaction(
        &self,
        skeleton: &mut TransactionSkeleton,
        script_group: &ScriptGroup,
        context: &HandlerContext,
    ) -> CcResult<bool>;
}
