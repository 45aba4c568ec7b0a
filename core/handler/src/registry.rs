use cc_protocol::log;
use cc_protocol::traits::ScriptHandler;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::script_group::ScriptGroup;
use cc_protocol::types::transaction::TransactionSkeleton;
use cc_protocol::CcResult;

use crate::{
    AnyoneCanPayHandler, Secp256k1Blake160MultisigAllHandler, Secp256k1Blake160SighashAllHandler,
    SudtHandler,
};

/// Ordered handler list; the first handler returning `Ok(true)` claims a group.
pub struct ScriptHandlerRegistry {
    handlers: Vec<Box<dyn ScriptHandler>>,
}

impl ScriptHandlerRegistry {
    pub fn new(handlers: Vec<Box<dyn ScriptHandler>>) -> Self {
        ScriptHandlerRegistry { handlers }
    }

    /// `[SighashAll, MultisigAll, AnyoneCanPay, Sudt]` for `network`.
    pub fn default_for(network: NetworkType) -> Self {
        ScriptHandlerRegistry::new(vec![
            Box::new(Secp256k1Blake160SighashAllHandler::new(network)),
            Box::new(Secp256k1Blake160MultisigAllHandler::new(network)),
            Box::new(AnyoneCanPayHandler::new(network)),
            Box::new(SudtHandler::new(network)),
        ])
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn push(&mut self, handler: Box<dyn ScriptHandler>) {
        self.handlers.push(handler);
    }

    pub fn dispatch(
        &self,
        skeleton: &mut TransactionSkeleton,
        script_group: &ScriptGroup,
        context: &HandlerContext,
    ) -> CcResult<bool> {
        for (position, handler) in self.handlers.iter().enumerate() {
            if handler.build_transaction(skeleton, script_group, context)? {
                log::debug!(
                    "[registry] {:?} group claimed by handler #{}",
                    script_group.group_type,
                    position
                );
                return Ok(true);
            }
        }
        Ok(false)
    }
}
