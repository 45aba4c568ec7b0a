use ckb_jsonrpc_types::{CellOutput as JsonCellOutput, JsonBytes, OutPoint as JsonOutPoint};
use ckb_types::bytes::Bytes;
use ckb_types::packed::{CellInput, CellOutput, OutPoint};
use ckb_types::prelude::{Builder, Entity, Unpack};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// A live cell offered to the builder as a spending candidate.
#[derive(Clone, Debug, Constructor)]
pub struct TransactionInput {
    pub out_point: OutPoint,
    pub output: CellOutput,
    pub output_data: Bytes,
}

impl TransactionInput {
    pub fn cell_input(&self) -> CellInput {
        CellInput::new_builder()
            .previous_output(self.out_point.clone())
            .build()
    }

    pub fn capacity(&self) -> u64 {
        self.output.capacity().unpack()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonTransactionInput {
    pub out_point: JsonOutPoint,
    pub output: JsonCellOutput,
    #[serde(default)]
    pub output_data: JsonBytes,
}

impl From<JsonTransactionInput> for TransactionInput {
    fn from(cell: JsonTransactionInput) -> Self {
        TransactionInput::new(
            cell.out_point.into(),
            cell.output.into(),
            cell.output_data.into_bytes(),
        )
    }
}

impl From<&TransactionInput> for JsonTransactionInput {
    fn from(input: &TransactionInput) -> Self {
        JsonTransactionInput {
            out_point: input.out_point.clone().into(),
            output: input.output.clone().into(),
            output_data: JsonBytes::from_bytes(input.output_data.clone()),
        }
    }
}
