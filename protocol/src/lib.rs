pub mod traits;
pub mod types;

pub use ckb_hash;
pub use ckb_jsonrpc_types;
pub use ckb_sdk;
pub use ckb_types;
pub use derive_more;
pub use hex;
pub use lazy_static::lazy_static;
pub use log;
pub use serde_json;

pub use types::error::{CcError, CcResult};
pub use types::logger::Logger;

#[allow(non_snake_case)]
pub mod TestVars {
    use crate::ckb_types::{h160, h256, H160, H256};

    pub const SENDER_ADDRESS: &str = "ckt1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsq02cgdvd5mng9924xarf3rflqzafzmzlpsuhh83c";
    pub const SENDER_ARGS: H160 = h160!("0xeac21ac6d373414aaa9ba34c469f805d48b62f86");

    pub const RECEIVER_ADDRESS: &str = "ckt1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsqdamwzrffgc54ef48493nfd2sd0h4cjnxg4850up";
    pub const RECEIVER_ARGS: H160 = h160!("0xbddb8434a518a5729a9ea58cd2d541afbd712999");

    pub const SHORT_ADDRESS: &str = "ckt1qyqycu3e597mvx7qpdpf45jdpn5u27w574rq8stzv3";
    pub const SHORT_ADDRESS_ARGS: H160 = h160!("0x4c7239a17db61bc00b429ad24d0ce9c579d4f546");

    pub const SUDT_ARGS: H256 =
        h256!("0xae4147ba8412767b3fd9bd16d45dab2fa5df283a6fd68dae5367524daa767ca7");
}
