use cc_protocol::derive_more::Display;
use cc_protocol::types::error::{CcError, ErrorType};

#[derive(Display, Debug)]
pub enum ConfigError {
    #[display(fmt = "Invalid config path: {}, reason = {}", _0, _1)]
    LoadingConfig(String, String),

    #[display(fmt = "Invalid config content, reason = {}", _0)]
    ParsingConfig(String),

    #[display(fmt = "Invalid cells file path: {}, reason = {}", _0, _1)]
    LoadingCells(String, String),
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CcError {
    fn from(error: ConfigError) -> CcError {
        CcError::new(ErrorType::Config, Box::new(error))
    }
}
