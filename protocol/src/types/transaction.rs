use std::error::Error;

use ckb_types::bytes::Bytes;
use ckb_types::core::TransactionView;
use ckb_types::packed::{Byte32, CellDep, CellInput, CellOutput, WitnessArgs};
use ckb_types::prelude::{Builder, Entity, Pack, Unpack};
use derive_more::{Constructor, Display};

use crate::types::error::{CcError, ErrorType};
use crate::types::hex::Hex;
use crate::types::script_group::ScriptGroup;
use crate::CcResult;

#[derive(Display, Debug)]
pub enum TransactionError {
    #[display(fmt = "Witness index {} out of range, inputs count = {}", _0, _1)]
    IndexOutOfRange(usize, usize),

    #[display(fmt = "Witness at index {} is not a WitnessArgs", _0)]
    MalformedWitness(usize),

    #[display(fmt = "Cell dep {}:{} is already present with another dep type", _0, _1)]
    CellDepConflict(String, u32),
}

impl Error for TransactionError {}

impl From<TransactionError> for CcError {
    fn from(error: TransactionError) -> CcError {
        CcError::new(ErrorType::Transaction, Box::new(error))
    }
}

/// Which field of `WitnessArgs` a witness write targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WitnessType {
    Lock,
    InputType,
    OutputType,
}

/// Mutable transaction body shared between the builder and script handlers.
///
/// `witnesses` is kept parallel to `inputs`; a fresh input starts with an
/// empty witness.
#[derive(Clone, Debug, Default)]
pub struct TransactionSkeleton {
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    pub outputs_data: Vec<Bytes>,
    pub witnesses: Vec<Bytes>,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<Byte32>,
}

impl TransactionSkeleton {
    pub fn add_input(&mut self, input: CellInput) {
        self.inputs.push(input);
        self.witnesses.push(Bytes::new());
    }

    pub fn add_output(&mut self, output: CellOutput, data: Bytes) {
        self.outputs.push(output);
        self.outputs_data.push(data);
    }

    pub fn set_witness(
        &mut self,
        index: usize,
        witness_type: WitnessType,
        data: Bytes,
    ) -> CcResult<()> {
        if index >= self.inputs.len() {
            return Err(TransactionError::IndexOutOfRange(index, self.inputs.len()).into());
        }
        let raw = &self.witnesses[index];
        let witness_args = if raw.is_empty() {
            WitnessArgs::default()
        } else {
            WitnessArgs::from_slice(raw).map_err(|_| TransactionError::MalformedWitness(index))?
        };
        let builder = witness_args.as_builder();
        let witness_args = match witness_type {
            WitnessType::Lock => builder.lock(Some(data).pack()),
            WitnessType::InputType => builder.input_type(Some(data).pack()),
            WitnessType::OutputType => builder.output_type(Some(data).pack()),
        }
        .build();
        self.witnesses[index] = witness_args.as_bytes();
        Ok(())
    }

    /// Inserting an identical dep twice is a no-op; the same out point with a
    /// different dep type is rejected.
    pub fn add_cell_dep(&mut self, cell_dep: CellDep) -> CcResult<()> {
        let out_point = cell_dep.out_point();
        if let Some(existing) = self
            .cell_deps
            .iter()
            .find(|dep| dep.out_point() == out_point)
        {
            if existing == &cell_dep {
                return Ok(());
            }
            return Err(TransactionError::CellDepConflict(
                Hex::encode(out_point.tx_hash().as_slice()),
                out_point.index().unpack(),
            )
            .into());
        }
        self.cell_deps.push(cell_dep);
        Ok(())
    }

    pub fn add_header_dep(&mut self, header_dep: Byte32) {
        if !self.header_deps.contains(&header_dep) {
            self.header_deps.push(header_dep);
        }
    }

    pub fn witness_args(&self, index: usize) -> Option<WitnessArgs> {
        self.witnesses
            .get(index)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| WitnessArgs::from_slice(raw).ok())
    }

    pub fn build_tx_view(&self) -> TransactionView {
        TransactionView::new_advanced_builder()
            .inputs(self.inputs.clone())
            .outputs(self.outputs.clone())
            .outputs_data(self.outputs_data.iter().map(|data| data.pack()))
            .witnesses(self.witnesses.iter().map(|witness| witness.pack()))
            .cell_deps(self.cell_deps.clone())
            .header_deps(self.header_deps.clone())
            .build()
    }

    /// Size counted against the fee rate, including the 4-byte offset a
    /// transaction occupies in a block.
    pub fn serialized_size(&self) -> usize {
        self.build_tx_view().data().as_slice().len() + 4
    }
}

/// A finished draft plus the groups an external signer has to sign for.
#[derive(Clone, Debug, Constructor)]
pub struct TransactionWithScriptGroups {
    pub tx_view: TransactionView,
    pub script_groups: Vec<ScriptGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_types::core::DepType;
    use ckb_types::h256;
    use ckb_types::packed::OutPoint;

    fn dep(index: u32, dep_type: DepType) -> CellDep {
        CellDep::new_builder()
            .out_point(OutPoint::new(
                h256!("0xf8de3bb47d055cdf460d93a2a6e1b05f7432f9777c8c474abf4eec1d4aee5d37").pack(),
                index,
            ))
            .dep_type(dep_type.into())
            .build()
    }

    fn skeleton_with_inputs(count: usize) -> TransactionSkeleton {
        let mut skeleton = TransactionSkeleton::default();
        for _ in 0..count {
            skeleton.add_input(CellInput::default());
        }
        skeleton
    }

    #[test]
    fn witness_index_must_exist() {
        let mut skeleton = skeleton_with_inputs(2);
        assert!(skeleton
            .set_witness(1, WitnessType::Lock, Bytes::from(vec![0u8; 65]))
            .is_ok());
        let err = skeleton
            .set_witness(2, WitnessType::Lock, Bytes::from(vec![0u8; 65]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransactionError>(),
            Some(TransactionError::IndexOutOfRange(2, 2))
        ));
        assert_eq!(skeleton.witnesses.len(), 2);
        assert!(skeleton.witnesses[0].is_empty());
    }

    #[test]
    fn witness_fields_are_set_independently() {
        let mut skeleton = skeleton_with_inputs(1);
        skeleton
            .set_witness(0, WitnessType::InputType, Bytes::from(vec![1u8; 3]))
            .expect("input type");
        skeleton
            .set_witness(0, WitnessType::Lock, Bytes::from(vec![0u8; 65]))
            .expect("lock");
        let witness_args = skeleton.witness_args(0).expect("witness args");
        let lock: Option<Bytes> = witness_args.lock().to_opt().map(|lock| lock.raw_data());
        let input_type: Option<Bytes> = witness_args
            .input_type()
            .to_opt()
            .map(|input_type| input_type.raw_data());
        assert_eq!(lock.map(|lock| lock.len()), Some(65));
        assert_eq!(input_type, Some(Bytes::from(vec![1u8; 3])));
        assert!(witness_args.output_type().to_opt().is_none());
    }

    #[test]
    fn cell_deps_are_deduplicated() {
        let mut skeleton = TransactionSkeleton::default();
        skeleton.add_cell_dep(dep(0, DepType::DepGroup)).expect("first");
        skeleton.add_cell_dep(dep(0, DepType::DepGroup)).expect("again");
        skeleton.add_cell_dep(dep(1, DepType::DepGroup)).expect("other");
        assert_eq!(skeleton.cell_deps.len(), 2);
    }

    #[test]
    fn conflicting_dep_type_is_rejected() {
        let mut skeleton = TransactionSkeleton::default();
        skeleton.add_cell_dep(dep(0, DepType::DepGroup)).expect("first");
        let err = skeleton.add_cell_dep(dep(0, DepType::Code)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransactionError>(),
            Some(TransactionError::CellDepConflict(_, 0))
        ));
        assert_eq!(skeleton.cell_deps.len(), 1);
    }

    #[test]
    fn draft_keeps_witnesses_parallel_to_inputs() {
        let skeleton = skeleton_with_inputs(3);
        let tx = skeleton.build_tx_view();
        assert_eq!(tx.inputs().len(), 3);
        assert_eq!(tx.witnesses().len(), 3);
        assert!(skeleton.serialized_size() > 0);
    }
}
