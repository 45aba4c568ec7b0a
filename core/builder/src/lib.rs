mod ckb;
mod error;
mod filter;
mod helper;
mod sudt;

#[cfg(test)]
mod tests;

pub use ckb::TransactionBuilder;
pub use error::BuilderError;
pub use filter::SenderFilter;
pub use helper::calculate_fee;
pub use sudt::SudtTransactionBuilder;
