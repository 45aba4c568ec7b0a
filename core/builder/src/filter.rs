use cc_protocol::ckb_types::packed::{OutPoint, Script};
use cc_protocol::ckb_types::prelude::Entity;
use cc_protocol::traits::AddressResolver;
use cc_protocol::types::input::TransactionInput;
use cc_protocol::types::item::{Identity, Item};
use cc_protocol::types::network::NetworkType;
use cc_protocol::CcResult;

use crate::error::BuilderError;

enum Sender {
    Lock(Script),
    Identity(Identity),
    OutPoint(OutPoint),
}

/// Cells a builder may spend. With no sender declared every cell passes.
pub struct SenderFilter {
    network: NetworkType,
    senders: Vec<Sender>,
}

impl SenderFilter {
    pub fn new(network: NetworkType) -> Self {
        SenderFilter {
            network,
            senders: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    pub fn push(&mut self, item: Item, resolver: &impl AddressResolver) -> CcResult<()> {
        let sender = match item {
            Item::Address(address) => Sender::Lock(resolve_lock(self.network, &address, resolver)?),
            Item::Identity(identity) => Sender::Identity(identity),
            Item::OutPoint(out_point) => Sender::OutPoint(out_point),
        };
        self.senders.push(sender);
        Ok(())
    }

    pub fn matches(&self, cell: &TransactionInput) -> bool {
        if self.senders.is_empty() {
            return true;
        }
        let lock = cell.output.lock();
        self.senders.iter().any(|sender| match sender {
            Sender::Lock(script) => script.as_slice() == lock.as_slice(),
            Sender::Identity(identity) => identity.owns(self.network, &lock),
            Sender::OutPoint(out_point) => out_point.as_slice() == cell.out_point.as_slice(),
        })
    }
}

/// Decodes `address`, rejecting addresses of another network.
pub fn resolve_lock(
    network: NetworkType,
    address: &str,
    resolver: &impl AddressResolver,
) -> CcResult<Script> {
    let (lock, address_network) = resolver.decode(address)?;
    if address_network != network {
        return Err(BuilderError::NetworkMismatch(network, address_network).into());
    }
    Ok(lock)
}
