pub mod amount;
pub mod config;
pub mod error;
pub mod handler;
pub mod hex;
pub mod input;
pub mod item;
pub mod logger;
pub mod multisig;
pub mod network;
pub mod script_group;
pub mod system_script;
pub mod transaction;
