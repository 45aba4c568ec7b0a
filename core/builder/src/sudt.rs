use cc_address::CkbAddressResolver;
use cc_core_handler::ScriptHandlerRegistry;
use cc_protocol::ckb_types::bytes::Bytes;
use cc_protocol::ckb_types::packed::{Byte32, CellDep, CellOutput, Script};
use cc_protocol::ckb_types::prelude::{Builder, Entity, Pack, Unpack};
use cc_protocol::ckb_types::H256;
use cc_protocol::log;
use cc_protocol::traits::{AddressResolver, CellIterator};
use cc_protocol::types::amount::encode_amount;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::input::TransactionInput;
use cc_protocol::types::item::Item;
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::system_script::SystemScript;
use cc_protocol::types::transaction::{TransactionWithScriptGroups, WitnessType};
use cc_protocol::CcResult;

use crate::ckb::TransactionBuilder;
use crate::filter::resolve_lock;
use crate::helper;

/// sUDT transfer on top of [`TransactionBuilder`]: only cells of the token
/// type are spent and inputs and outputs must carry the same total amount.
pub struct SudtTransactionBuilder<I: CellIterator, R: AddressResolver = CkbAddressResolver> {
    inner: TransactionBuilder<I, R>,
    sudt_type: Script,
}

fn sudt_type_script(network: NetworkType, sudt_args: &H256) -> Script {
    SystemScript::Sudt
        .info(network)
        .script(Bytes::from(sudt_args.as_bytes().to_vec()))
}

impl<I: CellIterator> SudtTransactionBuilder<I> {
    pub fn from_sudt_args(network: NetworkType, cells: I, sudt_args: H256) -> Self {
        SudtTransactionBuilder::new_with_resolver(network, cells, CkbAddressResolver, sudt_args)
    }

    /// The token args are the script hash of the issuer's lock.
    pub fn from_owner_address(
        network: NetworkType,
        cells: I,
        owner_address: &str,
    ) -> CcResult<Self> {
        let owner_lock = resolve_lock(network, owner_address, &CkbAddressResolver)?;
        let sudt_args: H256 = owner_lock.calc_script_hash().unpack();
        Ok(SudtTransactionBuilder::from_sudt_args(network, cells, sudt_args))
    }
}

impl<I: CellIterator, R: AddressResolver> SudtTransactionBuilder<I, R> {
    pub fn new_with_resolver(
        network: NetworkType,
        cells: I,
        resolver: R,
        sudt_args: H256,
    ) -> Self {
        SudtTransactionBuilder {
            inner: TransactionBuilder::new_with_resolver(network, cells, resolver),
            sudt_type: sudt_type_script(network, &sudt_args),
        }
    }

    pub fn with_registry(mut self, registry: ScriptHandlerRegistry) -> Self {
        self.inner = self.inner.with_registry(registry);
        self
    }

    pub fn sudt_type_script(&self) -> &Script {
        &self.sudt_type
    }

    pub fn set_fee_rate(&mut self, fee_rate: u64) {
        self.inner.set_fee_rate(fee_rate);
    }

    pub fn add_handler_context(&mut self, context: HandlerContext) {
        self.inner.add_handler_context(context);
    }

    pub fn add_sender(&mut self, item: Item) -> CcResult<()> {
        self.inner.add_sender(item)
    }

    /// The output capacity is exactly the occupied capacity of the token cell.
    pub fn add_sudt_output_by_address(&mut self, address: &str, amount: u128) -> CcResult<()> {
        let lock = self.inner.resolve_address(address)?;
        let data = Bytes::from(encode_amount(amount).to_vec());
        let output = CellOutput::new_builder()
            .lock(lock)
            .type_(Some(self.sudt_type.clone()).pack())
            .build();
        let capacity = helper::occupied_capacity(&output, &data)?;
        let output = output.as_builder().capacity(capacity.pack()).build();
        log::debug!("[sudt] output amount = {}, capacity = {}", amount, capacity);
        self.inner.add_output(output, data)
    }

    pub fn add_output(&mut self, output: CellOutput, data: Bytes) -> CcResult<()> {
        self.inner.add_output(output, data)
    }

    pub fn add_change_output_by_address(&mut self, address: &str) -> CcResult<()> {
        self.inner.add_change_output_by_address(address)
    }

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inner.add_input(input);
    }

    pub fn set_witness(
        &mut self,
        index: usize,
        witness_type: WitnessType,
        data: Bytes,
    ) -> CcResult<()> {
        self.inner.set_witness(index, witness_type, data)
    }

    pub fn add_cell_dep(&mut self, cell_dep: CellDep) -> CcResult<()> {
        self.inner.add_cell_dep(cell_dep)
    }

    pub fn add_header_dep(&mut self, header_dep: Byte32) {
        self.inner.add_header_dep(header_dep);
    }

    pub fn build(self) -> CcResult<TransactionWithScriptGroups> {
        self.inner.build_inner(Some(self.sudt_type))
    }
}
