use cc_protocol::derive_more::Display;
use cc_protocol::types::error::{CcError, ErrorType};

#[derive(Display, Debug)]
pub enum HandlerError {
    #[display(fmt = "Lock script group has no inputs, script = {}", _0)]
    EmptyScriptGroup(String),
}

impl std::error::Error for HandlerError {}

impl From<HandlerError> for CcError {
    fn from(error: HandlerError) -> CcError {
        CcError::new(ErrorType::Handler, Box::new(error))
    }
}
