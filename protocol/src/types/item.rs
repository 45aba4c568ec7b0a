use std::convert::TryFrom;
use std::error::Error;

use ckb_jsonrpc_types::OutPoint as JsonOutPoint;
use ckb_types::packed::{OutPoint, Script};
use ckb_types::prelude::{Entity, Pack};
use ckb_types::H256;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::traits::AddressResolver;
use crate::types::error::{CcError, ErrorType};
use crate::types::hex::Hex;
use crate::types::network::NetworkType;
use crate::types::system_script::SystemScript;
use crate::CcResult;

pub const IDENTITY_FLAGS_CKB: u8 = 0x00;
const IDENTITY_CONTENT_LEN: usize = 20;

#[derive(Display, Debug)]
pub enum ItemError {
    #[display(fmt = "Identity content should be 20 bytes, got {}", _0)]
    InvalidIdentityLength(usize),

    #[display(fmt = "Not a secp256k1_blake160_sighash_all or anyone-can-pay address: {}", _0)]
    UnsupportedIdentityAddress(String),
}

impl Error for ItemError {}

impl From<ItemError> for CcError {
    fn from(error: ItemError) -> CcError {
        CcError::new(ErrorType::Item, Box::new(error))
    }
}

/// One flag byte followed by a 20-byte lock args digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity([u8; 21]);

impl Identity {
    pub fn new(flag: u8, content: &[u8]) -> CcResult<Self> {
        if content.len() != IDENTITY_CONTENT_LEN {
            return Err(ItemError::InvalidIdentityLength(content.len()).into());
        }
        let mut inner = [0u8; 21];
        inner[0] = flag;
        inner[1..].copy_from_slice(content);
        Ok(Identity(inner))
    }

    pub fn flag(&self) -> u8 {
        self.0[0]
    }

    pub fn content(&self) -> &[u8] {
        &self.0[1..]
    }

    pub fn as_bytes(&self) -> &[u8; 21] {
        &self.0
    }

    /// True when `lock` is a sighash or anyone-can-pay lock owned by this identity.
    pub fn owns(&self, network: NetworkType, lock: &Script) -> bool {
        if self.flag() != IDENTITY_FLAGS_CKB {
            return false;
        }
        let args = lock.args().raw_data();
        let is_sighash = SystemScript::Secp256k1Blake160SighashAll.is_script(network, lock);
        let is_acp = SystemScript::AnyoneCanPay.is_script(network, lock);
        (is_sighash || is_acp)
            && args.len() >= IDENTITY_CONTENT_LEN
            && &args[..IDENTITY_CONTENT_LEN] == self.content()
    }
}

/// A transaction participant, named by whichever representation the caller holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JsonItem", into = "JsonItem")]
pub enum Item {
    Address(String),
    Identity(Identity),
    OutPoint(OutPoint),
}

impl Item {
    pub fn new_address_item(address: &str) -> Item {
        Item::Address(address.to_owned())
    }

    /// Uses the first 20 bytes of a public key hash as identity content.
    pub fn new_identity_item_by_public_key_hash(public_key_hash: &[u8]) -> CcResult<Item> {
        if public_key_hash.len() < IDENTITY_CONTENT_LEN {
            return Err(ItemError::InvalidIdentityLength(public_key_hash.len()).into());
        }
        let identity = Identity::new(
            IDENTITY_FLAGS_CKB,
            &public_key_hash[..IDENTITY_CONTENT_LEN],
        )?;
        Ok(Item::Identity(identity))
    }

    pub fn new_identity_item_by_ckb(public_key_hash: &[u8]) -> CcResult<Item> {
        Ok(Item::Identity(Identity::new(
            IDENTITY_FLAGS_CKB,
            public_key_hash,
        )?))
    }

    pub fn new_identity_item_by_address(
        address: &str,
        resolver: &impl AddressResolver,
    ) -> CcResult<Item> {
        let (lock, network) = resolver.decode(address)?;
        let supported = [
            SystemScript::Secp256k1Blake160SighashAll,
            SystemScript::AnyoneCanPay,
        ];
        if !supported
            .into_iter()
            .any(|script| script.is_script(network, &lock))
        {
            return Err(ItemError::UnsupportedIdentityAddress(address.to_owned()).into());
        }
        let args = lock.args().raw_data();
        Ok(Item::Identity(Identity::new(
            IDENTITY_FLAGS_CKB,
            &args[..args.len().min(IDENTITY_CONTENT_LEN)],
        )?))
    }

    pub fn new_out_point_item(tx_hash: H256, index: u32) -> Item {
        Item::OutPoint(OutPoint::new(tx_hash.pack(), index))
    }

    /// Short human readable form used in log lines.
    pub fn describe(&self) -> String {
        match self {
            Item::Address(address) => address.clone(),
            Item::Identity(identity) => Hex::encode(identity.as_bytes()),
            Item::OutPoint(out_point) => Hex::encode(out_point.as_slice()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum JsonItem {
    Address(String),
    Identity(String),
    OutPoint(JsonOutPoint),
}

impl From<Item> for JsonItem {
    fn from(item: Item) -> JsonItem {
        match item {
            Item::Address(address) => JsonItem::Address(address),
            Item::Identity(identity) => JsonItem::Identity(Hex::encode(identity.as_bytes())),
            Item::OutPoint(out_point) => JsonItem::OutPoint(out_point.into()),
        }
    }
}

impl TryFrom<JsonItem> for Item {
    type Error = String;

    fn try_from(item: JsonItem) -> Result<Self, Self::Error> {
        match item {
            JsonItem::Address(address) => Ok(Item::Address(address)),
            JsonItem::Identity(hex) => {
                let bytes = Hex::decode_fixed::<21>(&hex).map_err(|err| err.to_string())?;
                let identity =
                    Identity::new(bytes[0], &bytes[1..]).map_err(|err| err.to_string())?;
                Ok(Item::Identity(identity))
            }
            JsonItem::OutPoint(out_point) => Ok(Item::OutPoint(out_point.into())),
        }
    }
}
