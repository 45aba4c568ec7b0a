use cc_protocol::derive_more::Display;
use cc_protocol::types::error::{CcError, ErrorType};

#[derive(Display, Debug)]
pub enum CliError {
    #[display(fmt = "Cannot serialize the transaction draft, reason = {}", _0)]
    SerializingDraft(String),
}

impl std::error::Error for CliError {}

impl From<CliError> for CcError {
    fn from(error: CliError) -> CcError {
        CcError::new(ErrorType::Cli, Box::new(error))
    }
}
