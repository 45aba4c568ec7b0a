use std::error::Error;

use derive_more::Display;
use hex::FromHexError;

use crate::types::error::{CcError, ErrorType};
use crate::CcResult;

const HEX_PREFIX: &str = "0x";
const HEX_PREFIX_UPPER: &str = "0X";

#[derive(Display, Debug)]
pub enum HexError {
    #[display(fmt = "Decode hex error {}", _0)]
    Decode(FromHexError),

    #[display(fmt = "Expect {} bytes, got {}", _0, _1)]
    Length(usize, usize),
}

impl Error for HexError {}

impl From<FromHexError> for HexError {
    fn from(err: FromHexError) -> Self {
        HexError::Decode(err)
    }
}

impl From<HexError> for CcError {
    fn from(e: HexError) -> Self {
        CcError::new(ErrorType::Hex, Box::new(e))
    }
}

/// `0x` prefixed hex string helpers used by the JSON forms.
pub struct Hex;

impl Hex {
    pub fn encode<T: AsRef<[u8]>>(src: T) -> String {
        let mut s = HEX_PREFIX.to_string();
        s.push_str(&hex::encode(src));
        s
    }

    pub fn decode(s: &str) -> CcResult<Vec<u8>> {
        let s = if Self::is_prefixed(s) { &s[2..] } else { s };
        Ok(hex::decode(s).map_err(HexError::Decode)?)
    }

    pub fn decode_fixed<const N: usize>(s: &str) -> CcResult<[u8; N]> {
        let bytes = Self::decode(s)?;
        if bytes.len() != N {
            return Err(HexError::Length(N, bytes.len()).into());
        }
        let mut fixed = [0u8; N];
        fixed.copy_from_slice(&bytes);
        Ok(fixed)
    }

    fn is_prefixed(s: &str) -> bool {
        s.starts_with(HEX_PREFIX) || s.starts_with(HEX_PREFIX_UPPER)
    }
}
