use cc_address::CkbAddressResolver;
use cc_core_handler::ScriptHandlerRegistry;
use cc_protocol::ckb_types::bytes::Bytes;
use cc_protocol::ckb_types::packed::{Byte32, CellDep, CellOutput, Script};
use cc_protocol::ckb_types::prelude::{Builder, Entity, Pack, Unpack};
use cc_protocol::log;
use cc_protocol::traits::{AddressResolver, CellIterator};
use cc_protocol::types::amount::{decode_amount, encode_amount, AmountError};
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::hex::Hex;
use cc_protocol::types::input::TransactionInput;
use cc_protocol::types::item::{Item, IDENTITY_FLAGS_CKB};
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::script_group::ScriptGroup;
use cc_protocol::types::system_script::SystemScript;
use cc_protocol::types::transaction::{
    TransactionSkeleton, TransactionWithScriptGroups, WitnessType,
};
use cc_protocol::CcResult;

use crate::error::BuilderError;
use crate::filter::{resolve_lock, SenderFilter};
use crate::helper;

/// Running totals over every input spent so far.
#[derive(Default, Clone, Copy, Debug)]
struct Collected {
    capacity: u64,
    amount: u128,
}

enum Balance {
    Complete {
        skeleton: TransactionSkeleton,
        script_groups: Vec<ScriptGroup>,
        fee: u64,
    },
    Shortfall(u64),
}

/// Collects cells from `cells` until the declared outputs, the change output
/// and the fee are covered, then lets the handler registry fill witnesses and
/// cell deps.
pub struct TransactionBuilder<I: CellIterator, R: AddressResolver = CkbAddressResolver> {
    network: NetworkType,
    cells: I,
    resolver: R,
    registry: ScriptHandlerRegistry,
    senders: SenderFilter,
    skeleton: TransactionSkeleton,
    inputs: Vec<TransactionInput>,
    change_lock: Option<Script>,
    contexts: Vec<HandlerContext>,
    fee_rate: u64,
}

impl<I: CellIterator> TransactionBuilder<I> {
    pub fn new(network: NetworkType, cells: I) -> Self {
        TransactionBuilder::new_with_resolver(network, cells, CkbAddressResolver)
    }
}

impl<I: CellIterator, R: AddressResolver> TransactionBuilder<I, R> {
    pub fn new_with_resolver(network: NetworkType, cells: I, resolver: R) -> Self {
        TransactionBuilder {
            network,
            cells,
            resolver,
            registry: ScriptHandlerRegistry::default_for(network),
            senders: SenderFilter::new(network),
            skeleton: TransactionSkeleton::default(),
            inputs: vec![],
            change_lock: None,
            contexts: vec![],
            fee_rate: 0,
        }
    }

    /// Replaces the default `[SighashAll, MultisigAll, AnyoneCanPay, Sudt]` handler order.
    pub fn with_registry(mut self, registry: ScriptHandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn fee_rate(&self) -> u64 {
        self.fee_rate
    }

    /// Shannons per 1000 bytes of serialized transaction.
    pub fn set_fee_rate(&mut self, fee_rate: u64) {
        self.fee_rate = fee_rate;
    }

    pub fn add_handler_context(&mut self, context: HandlerContext) {
        self.contexts.push(context);
    }

    /// Restricts coin selection to cells owned by `item`; may be called repeatedly.
    pub fn add_sender(&mut self, item: Item) -> CcResult<()> {
        log::debug!("[builder] add sender {}", item.describe());
        self.senders.push(item, &self.resolver)
    }

    pub fn resolve_address(&self, address: &str) -> CcResult<Script> {
        resolve_lock(self.network, address, &self.resolver)
    }

    pub fn add_output(&mut self, output: CellOutput, data: Bytes) -> CcResult<()> {
        let capacity: u64 = output.capacity().unpack();
        let occupied = helper::occupied_capacity(&output, &data)?;
        if capacity < occupied {
            return Err(BuilderError::InvalidCapacity(capacity, occupied).into());
        }
        self.skeleton.add_output(output, data);
        Ok(())
    }

    pub fn add_output_by_address(&mut self, address: &str, capacity: u64) -> CcResult<()> {
        let lock = self.resolve_address(address)?;
        self.add_output_by_lock(lock, capacity)
    }

    /// Addresses and CKB identities name a receiving lock; out points do not.
    pub fn add_output_by_item(&mut self, item: &Item, capacity: u64) -> CcResult<()> {
        let lock = match item {
            Item::Address(address) => self.resolve_address(address)?,
            Item::Identity(identity) if identity.flag() == IDENTITY_FLAGS_CKB => {
                SystemScript::Secp256k1Blake160SighashAll
                    .info(self.network)
                    .script(Bytes::from(identity.content().to_vec()))
            }
            _ => return Err(BuilderError::UnsupportedItem(item.describe()).into()),
        };
        self.add_output_by_lock(lock, capacity)
    }

    fn add_output_by_lock(&mut self, lock: Script, capacity: u64) -> CcResult<()> {
        let output = CellOutput::new_builder()
            .capacity(capacity.pack())
            .lock(lock)
            .build();
        self.add_output(output, Bytes::new())
    }

    /// Declares the output that receives the leftover; it is always placed last.
    pub fn add_change_output_by_address(&mut self, address: &str) -> CcResult<()> {
        if self.change_lock.is_some() {
            return Err(BuilderError::ChangeOutputExists.into());
        }
        let lock = self.resolve_address(address)?;
        self.change_lock = Some(lock);
        Ok(())
    }

    /// Spends `input` unconditionally, ahead of any cell pulled from the iterator.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.skeleton.add_input(input.cell_input());
        self.inputs.push(input);
    }

    pub fn set_witness(
        &mut self,
        index: usize,
        witness_type: WitnessType,
        data: Bytes,
    ) -> CcResult<()> {
        self.skeleton.set_witness(index, witness_type, data)
    }

    pub fn add_cell_dep(&mut self, cell_dep: CellDep) -> CcResult<()> {
        self.skeleton.add_cell_dep(cell_dep)
    }

    pub fn add_header_dep(&mut self, header_dep: Byte32) {
        self.skeleton.add_header_dep(header_dep);
    }

    pub fn build(self) -> CcResult<TransactionWithScriptGroups> {
        self.build_inner(None)
    }

    /// With `token_type`, only cells of that type are spent and the change
    /// output carries the leftover token amount.
    pub(crate) fn build_inner(
        mut self,
        token_type: Option<Script>,
    ) -> CcResult<TransactionWithScriptGroups> {
        let token_type = token_type.as_ref();
        let output_capacity = helper::checked_sum_capacity(&self.skeleton.outputs)?;
        let output_amount = match token_type {
            Some(type_script) => helper::sum_token_amounts(
                self.skeleton
                    .outputs
                    .iter()
                    .zip(self.skeleton.outputs_data.iter().map(|data| &data[..])),
                type_script,
            )?,
            None => 0,
        };

        let mut collected = Collected::default();
        for input in &self.inputs {
            collected = accumulate(collected, input, token_type)?;
        }
        let mut selected = vec![];
        let mut required_capacity = output_capacity;

        loop {
            if collected.amount >= output_amount && !(self.inputs.is_empty() && selected.is_empty())
            {
                let balance = self.try_balance(
                    &selected,
                    collected,
                    output_capacity,
                    output_amount,
                    token_type,
                )?;
                match balance {
                    Balance::Complete {
                        skeleton,
                        script_groups,
                        fee,
                    } => {
                        let mut inputs = self.inputs;
                        inputs.extend(selected);
                        helper::check_invariants(
                            &skeleton,
                            &inputs,
                            &script_groups,
                            fee,
                            token_type,
                        )?;
                        log::info!(
                            "[builder] balanced {} inputs / {} outputs, fee = {}, groups = {}",
                            skeleton.inputs.len(),
                            skeleton.outputs.len(),
                            fee,
                            script_groups.len()
                        );
                        return Ok(TransactionWithScriptGroups::new(
                            skeleton.build_tx_view(),
                            script_groups,
                        ));
                    }
                    Balance::Shortfall(required) => required_capacity = required,
                }
            }
            match self.next_candidate(token_type)? {
                Some(cell) => {
                    collected = accumulate(collected, &cell, token_type)?;
                    log::debug!(
                        "[builder] selected {}, collected capacity = {}, amount = {}",
                        Hex::encode(cell.out_point.as_slice()),
                        collected.capacity,
                        collected.amount
                    );
                    selected.push(cell);
                }
                None => break,
            }
        }

        if collected.amount < output_amount {
            return Err(
                BuilderError::InsufficientTokenBalance(output_amount, collected.amount).into(),
            );
        }
        Err(BuilderError::InsufficientFunds(required_capacity, collected.capacity).into())
    }

    /// Pulls until a spendable cell shows up; skipped cells are dropped.
    fn next_candidate(
        &mut self,
        token_type: Option<&Script>,
    ) -> CcResult<Option<TransactionInput>> {
        for cell in self.cells.by_ref() {
            let type_matches = match (token_type, cell.output.type_().to_opt()) {
                (None, None) => true,
                (Some(expected), Some(actual)) => helper::same_script(expected, &actual),
                _ => false,
            };
            if type_matches && self.senders.matches(&cell) {
                return Ok(Some(cell));
            }
        }
        Ok(None)
    }

    fn try_balance(
        &self,
        selected: &[TransactionInput],
        collected: Collected,
        output_capacity: u64,
        output_amount: u128,
        token_type: Option<&Script>,
    ) -> CcResult<Balance> {
        let mut skeleton = self.skeleton.clone();
        for input in selected {
            skeleton.add_input(input.cell_input());
        }
        let leftover_amount = collected.amount - output_amount;

        let mut change_occupied = 0;
        if let Some(lock) = &self.change_lock {
            let data = match token_type {
                Some(_) => Bytes::from(encode_amount(leftover_amount).to_vec()),
                None => Bytes::new(),
            };
            let change = CellOutput::new_builder()
                .lock(lock.clone())
                .type_(token_type.cloned().pack())
                .build();
            change_occupied = helper::occupied_capacity(&change, &data)?;
            skeleton.add_output(change, data);
        }

        let inputs = self.inputs.iter().chain(selected).cloned().collect::<Vec<_>>();
        let script_groups = helper::group_scripts(&inputs, &skeleton.outputs);
        for group in &script_groups {
            self.dispatch(&mut skeleton, group)?;
        }

        let fee = helper::calculate_fee(self.fee_rate, skeleton.serialized_size())?;
        let required = output_capacity
            .checked_add(change_occupied)
            .and_then(|capacity| capacity.checked_add(fee))
            .ok_or(BuilderError::CapacityOverflow)?;
        if collected.capacity < required {
            return Ok(Balance::Shortfall(required));
        }
        let leftover = collected.capacity - output_capacity - fee;

        if self.change_lock.is_some() {
            if let Some(change) = skeleton.outputs.pop() {
                skeleton
                    .outputs
                    .push(change.as_builder().capacity(leftover.pack()).build());
            }
        } else if leftover != 0 || leftover_amount != 0 {
            return Err(BuilderError::DanglingChange(leftover, leftover_amount).into());
        }
        Ok(Balance::Complete {
            skeleton,
            script_groups,
            fee,
        })
    }

    /// Tries every handler context in order; without contexts `NoContext` is used.
    /// Only groups spending inputs must be claimed, output-only type groups rely on
    /// deps added through `add_cell_dep` when no handler knows them.
    fn dispatch(&self, skeleton: &mut TransactionSkeleton, group: &ScriptGroup) -> CcResult<()> {
        let no_context = [HandlerContext::NoContext];
        let contexts = if self.contexts.is_empty() {
            &no_context[..]
        } else {
            &self.contexts[..]
        };
        for context in contexts {
            if self.registry.dispatch(skeleton, group, context)? {
                return Ok(());
            }
        }
        if group.input_indices.is_empty() {
            log::debug!(
                "[builder] output-only type group {} left unclaimed",
                Hex::encode(group.script.as_slice())
            );
            return Ok(());
        }
        Err(BuilderError::UnresolvedScriptGroup(
            format!("{:?}", group.group_type).to_lowercase(),
            Hex::encode(group.script.as_slice()),
        )
        .into())
    }
}

fn accumulate(
    collected: Collected,
    cell: &TransactionInput,
    token_type: Option<&Script>,
) -> CcResult<Collected> {
    let capacity = collected
        .capacity
        .checked_add(cell.capacity())
        .ok_or(BuilderError::CapacityOverflow)?;
    let amount = match token_type {
        Some(type_script) if helper::has_type(&cell.output, type_script) => {
            let amount = decode_amount(&cell.output_data)?;
            collected.amount.checked_add(amount).ok_or_else(|| {
                AmountError::AmountOutOfRange(format!("{} + {}", collected.amount, amount))
            })?
        }
        _ => collected.amount,
    };
    Ok(Collected { capacity, amount })
}
