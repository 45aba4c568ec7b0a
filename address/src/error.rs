use cc_protocol::derive_more::Display;
use cc_protocol::types::error::{CcError, ErrorType};

#[derive(Display, Debug)]
pub enum AddressError {
    #[display(fmt = "Invalid address format: {}, reason = {}", _0, _1)]
    InvalidAddressFormat(String, String),

    #[display(fmt = "Unsupported address network: {}", _0)]
    UnsupportedNetwork(String),
}

impl std::error::Error for AddressError {}

impl From<AddressError> for CcError {
    fn from(error: AddressError) -> CcError {
        CcError::new(ErrorType::Address, Box::new(error))
    }
}
