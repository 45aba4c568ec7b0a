use std::error::Error;
use std::num::IntErrorKind;

use derive_more::Display;

use crate::types::error::{CcError, ErrorType};
use crate::CcResult;

/// Width of an sUDT amount stored in `outputs_data`.
pub const SUDT_AMOUNT_LEN: usize = 16;

#[derive(Display, Debug)]
pub enum AmountError {
    #[display(fmt = "Malformed sUDT amount, expect {} bytes but got {}", SUDT_AMOUNT_LEN, _0)]
    MalformedAmount(usize),

    #[display(fmt = "sUDT amount out of range: {}", _0)]
    AmountOutOfRange(String),

    #[display(fmt = "Invalid sUDT amount text: {}", _0)]
    InvalidAmountText(String),
}

impl Error for AmountError {}

impl From<AmountError> for CcError {
    fn from(error: AmountError) -> CcError {
        CcError::new(ErrorType::Amount, Box::new(error))
    }
}

pub fn encode_amount(amount: u128) -> [u8; SUDT_AMOUNT_LEN] {
    amount.to_le_bytes()
}

pub fn decode_amount(data: &[u8]) -> CcResult<u128> {
    if data.len() != SUDT_AMOUNT_LEN {
        return Err(AmountError::MalformedAmount(data.len()).into());
    }
    let mut bytes = [0u8; SUDT_AMOUNT_LEN];
    bytes.copy_from_slice(data);
    Ok(u128::from_le_bytes(bytes))
}

/// Parses a decimal amount, rejecting values above `u128::MAX`.
pub fn parse_amount(text: &str) -> CcResult<u128> {
    text.trim().parse::<u128>().map_err(|err| {
        let error = match err.kind() {
            IntErrorKind::PosOverflow => AmountError::AmountOutOfRange(text.to_owned()),
            _ => AmountError::InvalidAmountText(text.to_owned()),
        };
        error.into()
    })
}

pub fn checked_sum_amounts<T: IntoIterator<Item = u128>>(amounts: T) -> CcResult<u128> {
    amounts.into_iter().try_fold(0u128, |total, amount| {
        total.checked_add(amount).ok_or_else(|| {
            AmountError::AmountOutOfRange(format!("{} + {}", total, amount)).into()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_kind(err: &CcError, f: fn(&AmountError) -> bool) -> bool {
        err.downcast_ref::<AmountError>().map(f).unwrap_or(false)
    }

    #[test]
    fn encode_is_little_endian() {
        let bytes = encode_amount(0x0102);
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x01);
        assert!(bytes[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn decode_reverses_encode_at_boundaries() {
        for value in [0u128, 1, 100, u64::MAX as u128 + 1, u128::MAX] {
            assert_eq!(decode_amount(&encode_amount(value)).unwrap(), value);
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        for len in [0usize, 15, 17, 32] {
            let err = decode_amount(&vec![0u8; len]).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Amount);
            assert!(is_kind(&err, |e| matches!(e, AmountError::MalformedAmount(_))));
        }
    }

    #[test]
    fn parse_amount_bounds() {
        assert_eq!(parse_amount("340282366920938463463374607431768211455").unwrap(), u128::MAX);
        let err = parse_amount("340282366920938463463374607431768211456").unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, AmountError::AmountOutOfRange(_))));
        let err = parse_amount("12ab").unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, AmountError::InvalidAmountText(_))));
    }

    #[test]
    fn sum_overflow_is_out_of_range() {
        assert_eq!(checked_sum_amounts(vec![100, 10]).unwrap(), 110);
        let err = checked_sum_amounts(vec![u128::MAX, 1]).unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, AmountError::AmountOutOfRange(_))));
    }
}
