use std::cell::Cell;
use std::rc::Rc;

use cc_address::CkbAddressResolver;
use cc_protocol::ckb_types::bytes::Bytes;
use cc_protocol::ckb_types::core::TransactionView;
use cc_protocol::ckb_types::packed::{CellOutput, OutPoint, Script};
use cc_protocol::ckb_types::prelude::{Builder, Entity, Pack, Unpack};
use cc_protocol::ckb_types::H256;
use cc_protocol::traits::AddressResolver;
use cc_protocol::types::amount::encode_amount;
use cc_protocol::types::input::TransactionInput;


pub const CKB: u64 = 100_000_000;

pub fn lock_of(address: &str) -> Script {
    CkbAddressResolver.decode(address).expect("decode address").0
}

pub fn out_point(index: u32) -> OutPoint {
    OutPoint::new(H256([0u8; 32]).pack(), index)
}

pub fn ckb_cell(index: u32, lock: &Script, capacity: u64) -> TransactionInput {
    let output = CellOutput::new_builder()
        .capacity(capacity.pack())
        .lock(lock.clone())
        .build();
    TransactionInput::new(out_point(index), output, Bytes::new())
}

pub fn typed_cell(
    index: u32,
    lock: &Script,
    capacity: u64,
    type_script: &Script,
    data: Bytes,
) -> TransactionInput {
    let output = CellOutput::new_builder()
        .capacity(capacity.pack())
        .lock(lock.clone())
        .type_(Some(type_script.clone()).pack())
        .build();
    TransactionInput::new(out_point(index), output, data)
}

pub fn sudt_cell(
    index: u32,
    lock: &Script,
    capacity: u64,
    type_script: &Script,
    amount: u128,
) -> TransactionInput {
    typed_cell(
        index,
        lock,
        capacity,
        type_script,
        Bytes::from(encode_amount(amount).to_vec()),
    )
}

pub fn capacity_of(tx: &TransactionView, index: usize) -> u64 {
    tx.outputs()
        .get(index)
        .map(|output| output.capacity().unpack())
        .unwrap_or_default()
}

pub fn total_input_capacity(cells: &[TransactionInput], tx: &TransactionView) -> u64 {
    tx.input_pts_iter()
        .map(|out_point| {
            cells
                .iter()
                .find(|cell| cell.out_point.as_slice() == out_point.as_slice())
                .map(|cell| cell.capacity())
                .unwrap_or_default()
        })
        .sum()
}

/// Yields `cells` and records how many were pulled.
pub struct CountingCells {
    cells: std::vec::IntoIter<TransactionInput>,
    pulled: Rc<Cell<usize>>,
}

impl CountingCells {
    pub fn new(cells: Vec<TransactionInput>) -> (Self, Rc<Cell<usize>>) {
        let pulled = Rc::new(Cell::new(0));
        let counting = CountingCells {
            cells: cells.into_iter(),
            pulled: pulled.clone(),
        };
        (counting, pulled)
    }
}

impl Iterator for CountingCells {
    type Item = TransactionInput;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cells.next();
        if cell.is_some() {
            self.pulled.set(self.pulled.get() + 1);
        }
        cell
    }
}
