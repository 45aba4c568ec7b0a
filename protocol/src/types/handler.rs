use crate::types::multisig::MultisigConfig;

/// Extra data a handler may need; passed to every handler on every group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerContext {
    NoContext,
    Multisig(MultisigConfig),
}

impl Default for HandlerContext {
    fn default() -> Self {
        HandlerContext::NoContext
    }
}

impl From<MultisigConfig> for HandlerContext {
    fn from(config: MultisigConfig) -> Self {
        HandlerContext::Multisig(config)
    }
}
