use std::collections::HashSet;

use cc_protocol::ckb_types::bytes::Bytes;
use cc_protocol::ckb_types::core::Capacity;
use cc_protocol::ckb_types::packed::{CellOutput, Script};
use cc_protocol::ckb_types::prelude::{Entity, Unpack};
use cc_protocol::types::amount::{checked_sum_amounts, decode_amount};
use cc_protocol::types::input::TransactionInput;
use cc_protocol::types::script_group::{ScriptGroup, ScriptGroupType};
use cc_protocol::types::transaction::TransactionSkeleton;
use cc_protocol::CcResult;

use crate::error::BuilderError;

const KB: u128 = 1000;

/// `ceil(fee_rate * size / 1000)`, `fee_rate` in shannons per 1000 bytes.
pub fn calculate_fee(fee_rate: u64, size: usize) -> CcResult<u64> {
    let product = fee_rate as u128 * size as u128;
    let fee = (product + KB - 1) / KB;
    u64::try_from(fee).map_err(|_| BuilderError::CapacityOverflow.into())
}

pub fn occupied_capacity(output: &CellOutput, data: &Bytes) -> CcResult<u64> {
    let data_capacity = Capacity::bytes(data.len()).map_err(|_| BuilderError::CapacityOverflow)?;
    let occupied = output
        .occupied_capacity(data_capacity)
        .map_err(|_| BuilderError::CapacityOverflow)?;
    Ok(occupied.as_u64())
}

pub fn checked_sum_capacity<'a, T>(outputs: T) -> CcResult<u64>
where
    T: IntoIterator<Item = &'a CellOutput>,
{
    outputs.into_iter().try_fold(0u64, |total, output| {
        let capacity: u64 = output.capacity().unpack();
        total
            .checked_add(capacity)
            .ok_or_else(|| BuilderError::CapacityOverflow.into())
    })
}

pub fn same_script(left: &Script, right: &Script) -> bool {
    left.as_slice() == right.as_slice()
}

pub fn has_type(output: &CellOutput, type_script: &Script) -> bool {
    output
        .type_()
        .to_opt()
        .map(|script| same_script(&script, type_script))
        .unwrap_or(false)
}

/// Sum of the token amounts carried by outputs typed with `type_script`.
pub fn sum_token_amounts<'a, T>(cells: T, type_script: &Script) -> CcResult<u128>
where
    T: IntoIterator<Item = (&'a CellOutput, &'a [u8])>,
{
    let mut total = 0u128;
    for (output, data) in cells {
        if has_type(output, type_script) {
            let amount = decode_amount(data)?;
            total = checked_sum_amounts([total, amount])?;
        }
    }
    Ok(total)
}

fn push_group(
    groups: &mut Vec<ScriptGroup>,
    script: &Script,
    group_type: ScriptGroupType,
) -> usize {
    if let Some(position) = groups
        .iter()
        .position(|group| group.group_type == group_type && same_script(&group.script, script))
    {
        return position;
    }
    let group = match group_type {
        ScriptGroupType::Lock => ScriptGroup::from_lock_script(script),
        ScriptGroupType::Type => ScriptGroup::from_type_script(script),
    };
    groups.push(group);
    groups.len() - 1
}

/// Lock groups first, then type groups, each in first-seen order.
pub fn group_scripts(inputs: &[TransactionInput], outputs: &[CellOutput]) -> Vec<ScriptGroup> {
    let mut lock_groups = vec![];
    let mut type_groups = vec![];
    for (index, input) in inputs.iter().enumerate() {
        let position = push_group(&mut lock_groups, &input.output.lock(), ScriptGroupType::Lock);
        lock_groups[position].input_indices.push(index);
        if let Some(type_script) = input.output.type_().to_opt() {
            let position = push_group(&mut type_groups, &type_script, ScriptGroupType::Type);
            type_groups[position].input_indices.push(index);
        }
    }
    for (index, output) in outputs.iter().enumerate() {
        if let Some(type_script) = output.type_().to_opt() {
            let position = push_group(&mut type_groups, &type_script, ScriptGroupType::Type);
            type_groups[position].output_indices.push(index);
        }
    }
    lock_groups.extend(type_groups);
    lock_groups
}

fn violation(message: String) -> BuilderError {
    BuilderError::InvariantViolation(message)
}

/// Final checks on a balanced draft; nothing here repairs the skeleton.
pub fn check_invariants(
    skeleton: &TransactionSkeleton,
    inputs: &[TransactionInput],
    script_groups: &[ScriptGroup],
    fee: u64,
    token_type: Option<&Script>,
) -> CcResult<()> {
    let input_capacity = checked_sum_capacity(inputs.iter().map(|input| &input.output))?;
    let output_capacity = checked_sum_capacity(&skeleton.outputs)?;
    let spent = output_capacity
        .checked_add(fee)
        .ok_or(BuilderError::CapacityOverflow)?;
    if input_capacity < spent {
        return Err(violation(format!(
            "inputs capacity {} < outputs capacity {} + fee {}",
            input_capacity, output_capacity, fee
        ))
        .into());
    }

    if let Some(type_script) = token_type {
        let input_amount = sum_token_amounts(
            inputs
                .iter()
                .map(|input| (&input.output, &input.output_data[..])),
            type_script,
        )?;
        let output_amount = sum_token_amounts(
            skeleton
                .outputs
                .iter()
                .zip(skeleton.outputs_data.iter().map(|data| &data[..])),
            type_script,
        )?;
        if input_amount != output_amount {
            return Err(violation(format!(
                "inputs amount {} != outputs amount {}",
                input_amount, output_amount
            ))
            .into());
        }
    }

    if skeleton.witnesses.len() != skeleton.inputs.len() {
        return Err(violation(format!(
            "{} witnesses for {} inputs",
            skeleton.witnesses.len(),
            skeleton.inputs.len()
        ))
        .into());
    }
    for group in script_groups
        .iter()
        .filter(|group| group.group_type == ScriptGroupType::Lock)
    {
        let index = group.canonical_index().unwrap_or_default();
        if skeleton
            .witnesses
            .get(index)
            .map(|witness| witness.is_empty())
            .unwrap_or(true)
        {
            return Err(violation(format!("empty witness at lock group index {}", index)).into());
        }
    }

    let mut out_points = HashSet::new();
    for cell_dep in &skeleton.cell_deps {
        if !out_points.insert(cell_dep.out_point().as_bytes()) {
            return Err(violation("duplicated cell dep out point".to_owned()).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_protocol::ckb_types::prelude::{Builder, Pack};

    #[test]
    fn fee_rounds_up() {
        assert_eq!(calculate_fee(0, 1234).unwrap(), 0);
        assert_eq!(calculate_fee(1000, 1234).unwrap(), 1234);
        assert_eq!(calculate_fee(1, 1).unwrap(), 1);
        assert_eq!(calculate_fee(1, 1000).unwrap(), 1);
        assert_eq!(calculate_fee(1, 1001).unwrap(), 2);
        assert_eq!(calculate_fee(999, 3).unwrap(), 3);
    }

    #[test]
    fn fee_overflow_is_reported() {
        let err = calculate_fee(u64::MAX, usize::MAX).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuilderError>(),
            Some(BuilderError::CapacityOverflow)
        ));
    }

    #[test]
    fn occupied_capacity_counts_scripts_and_data() {
        let output = CellOutput::new_builder()
            .lock(
                Script::new_builder()
                    .args(Bytes::from(vec![0u8; 20]).pack())
                    .build(),
            )
            .build();
        // 8 capacity + 32 code hash + 1 hash type + 20 args
        assert_eq!(
            occupied_capacity(&output, &Bytes::new()).unwrap(),
            61 * 100_000_000
        );
        assert_eq!(
            occupied_capacity(&output, &Bytes::from(vec![0u8; 16])).unwrap(),
            77 * 100_000_000
        );
    }
}
