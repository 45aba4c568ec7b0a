use cc_protocol::serde_json;
use cc_protocol::types::config::CcConfig;
use cc_protocol::types::input::{JsonTransactionInput, TransactionInput};
use cc_protocol::CcResult;

mod error;
pub use error::ConfigError;


pub fn parse(content: &str) -> CcResult<CcConfig> {
    let config: CcConfig =
        toml::from_str(content).map_err(|err| ConfigError::ParsingConfig(err.to_string()))?;
    Ok(config)
}

pub fn load_file(path: &str) -> CcResult<CcConfig> {
    let file = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::LoadingConfig(path.into(), err.to_string()))?;
    let config: CcConfig = toml::from_str(file.as_str())
        .map_err(|err| ConfigError::LoadingConfig(path.into(), err.to_string()))?;
    Ok(config)
}

/// Reads a JSON array of live cells in the node RPC format.
pub fn load_cells_file(path: &str) -> CcResult<Vec<TransactionInput>> {
    let file = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::LoadingCells(path.into(), err.to_string()))?;
    let cells: Vec<JsonTransactionInput> = serde_json::from_str(file.as_str())
        .map_err(|err| ConfigError::LoadingCells(path.into(), err.to_string()))?;
    Ok(cells.into_iter().map(Into::into).collect())
}
