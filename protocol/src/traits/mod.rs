mod address;
mod cell;
mod handler;

pub use address::AddressResolver;
pub use cell::CellIterator;
pub use handler::ScriptHandler;
