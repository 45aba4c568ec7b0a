use std::collections::HashSet;
use std::error::Error;

use ckb_hash::blake2b_256;
use ckb_types::packed::Script;
use ckb_types::{bytes::Bytes, H160};
use derive_more::Display;

use crate::types::error::{CcError, ErrorType};
use crate::types::network::NetworkType;
use crate::types::system_script::SystemScript;
use crate::CcResult;

const SIGNATURE_SIZE: usize = 65;
const BLAKE160_SIZE: usize = 20;
const MULTISIG_HEADER_SIZE: usize = 4;

#[derive(Display, Debug)]
pub enum MultisigError {
    #[display(fmt = "Multisig config requires at least one signer")]
    NoSigners,

    #[display(fmt = "Too many multisig signers: {}", _0)]
    TooManySigners(usize),

    #[display(fmt = "Invalid threshold {} for {} signers", _0, _1)]
    InvalidThreshold(u8, usize),

    #[display(fmt = "require_first_n ({}) is larger than threshold ({})", _0, _1)]
    InvalidRequireFirstN(u8, u8),

    #[display(fmt = "Duplicated multisig signer 0x{}", _0)]
    DuplicatedSigner(String),
}

impl Error for MultisigError {}

impl From<MultisigError> for CcError {
    fn from(error: MultisigError) -> CcError {
        CcError::new(ErrorType::Multisig, Box::new(error))
    }
}

/// An m-of-n secp256k1/blake160 signer set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigConfig {
    signers: Vec<H160>,
    require_first_n: u8,
    threshold: u8,
}

impl MultisigConfig {
    pub fn new(signers: Vec<H160>, require_first_n: u8, threshold: u8) -> CcResult<Self> {
        if signers.is_empty() {
            return Err(MultisigError::NoSigners.into());
        }
        if signers.len() > u8::MAX as usize {
            return Err(MultisigError::TooManySigners(signers.len()).into());
        }
        if threshold == 0 || threshold as usize > signers.len() {
            return Err(MultisigError::InvalidThreshold(threshold, signers.len()).into());
        }
        if require_first_n > threshold {
            return Err(MultisigError::InvalidRequireFirstN(require_first_n, threshold).into());
        }
        let mut seen = HashSet::new();
        for signer in &signers {
            if !seen.insert(signer.clone()) {
                return Err(MultisigError::DuplicatedSigner(hex::encode(signer.as_bytes())).into());
            }
        }
        Ok(MultisigConfig {
            signers,
            require_first_n,
            threshold,
        })
    }

    pub fn signers(&self) -> &[H160] {
        &self.signers
    }

    pub fn require_first_n(&self) -> u8 {
        self.require_first_n
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Layout: `0x00 | require_first_n | threshold | n | blake160 * n`.
    pub fn to_bytes(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(MULTISIG_HEADER_SIZE + BLAKE160_SIZE * self.signers.len());
        bytes.extend_from_slice(&[
            0u8,
            self.require_first_n,
            self.threshold,
            self.signers.len() as u8,
        ]);
        for signer in &self.signers {
            bytes.extend_from_slice(signer.as_bytes());
        }
        Bytes::from(bytes)
    }

    pub fn hash160(&self) -> H160 {
        let hash = blake2b_256(&self.to_bytes());
        let mut inner = [0u8; BLAKE160_SIZE];
        inner.copy_from_slice(&hash[..BLAKE160_SIZE]);
        H160(inner)
    }

    pub fn placeholder_len(&self) -> usize {
        MULTISIG_HEADER_SIZE
            + BLAKE160_SIZE * self.signers.len()
            + SIGNATURE_SIZE * self.threshold as usize
    }

    pub fn placeholder_witness_lock(&self) -> Bytes {
        Bytes::from(vec![0u8; self.placeholder_len()])
    }

    pub fn lock_script(&self, network: NetworkType) -> Script {
        SystemScript::Secp256k1Blake160MultisigAll
            .info(network)
            .script(Bytes::from(self.hash160().as_bytes().to_vec()))
    }
}
