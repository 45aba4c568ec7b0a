use cc_protocol::derive_more::Display;
use cc_protocol::types::error::{CcError, ErrorType};
use cc_protocol::types::network::NetworkType;

#[derive(Display, Debug)]
pub enum BuilderError {
    #[display(fmt = "Insufficient capacity, required = {}, collected = {}", _0, _1)]
    InsufficientFunds(u64, u64),

    #[display(fmt = "Insufficient sUDT balance, required = {}, collected = {}", _0, _1)]
    InsufficientTokenBalance(u128, u128),

    #[display(fmt = "Output capacity {} is below its occupied capacity {}", _0, _1)]
    InvalidCapacity(u64, u64),

    #[display(fmt = "Address belongs to {}, builder is configured for {}", _1, _0)]
    NetworkMismatch(NetworkType, NetworkType),

    #[display(fmt = "No change output declared, leftover capacity = {}, leftover amount = {}", _0, _1)]
    DanglingChange(u64, u128),

    #[display(fmt = "No handler resolves {} script group {}", _0, _1)]
    UnresolvedScriptGroup(String, String),

    #[display(fmt = "Change output is already declared")]
    ChangeOutputExists,

    #[display(fmt = "Item cannot be used here: {}", _0)]
    UnsupportedItem(String),

    #[display(fmt = "Capacity overflow")]
    CapacityOverflow,

    #[display(fmt = "Transaction invariant violated: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for BuilderError {}

impl From<BuilderError> for CcError {
    fn from(error: BuilderError) -> CcError {
        CcError::new(ErrorType::Builder, Box::new(error))
    }
}
