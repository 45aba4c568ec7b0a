use crate::types::input::TransactionInput;

/// Lazily supplied candidate cells. `None` means the source is exhausted.
pub trait CellIterator: Iterator<Item = TransactionInput> {}

impl<T: Iterator<Item = TransactionInput>> CellIterator for T {}
