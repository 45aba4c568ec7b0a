use derive_more::{Constructor, Display};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    Amount,
    Multisig,
    Item,
    Transaction,
    Address,
    Handler,
    Builder,
    Config,
    Hex,
    Cli,
}

#[derive(Debug, Constructor, Display)]
#[display(fmt = "Type: {:?}, Message: {}", error_type, message)]
pub struct CcError {
    error_type: ErrorType,
    message: Box<dyn Error + Send>,
}

impl CcError {
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Borrows the concrete error raised by the originating crate, e.g. `BuilderError`.
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.message.downcast_ref::<T>()
    }
}

impl Error for CcError {}

pub type CcResult<T> = Result<T, CcError>;
