use std::cell::Cell;
use std::rc::Rc;

use cc_protocol::ckb_types::bytes::Bytes;
use cc_protocol::ckb_types::packed::{CellInput, Script};
use cc_protocol::ckb_types::prelude::{Builder, Entity, Pack};
use cc_protocol::ckb_types::{h160, H160, H256};
use cc_protocol::traits::ScriptHandler;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::multisig::MultisigConfig;
use cc_protocol::types::network::NetworkType;
use cc_protocol::types::script_group::ScriptGroup;
use cc_protocol::types::system_script::SystemScript;
use cc_protocol::types::transaction::{TransactionError, TransactionSkeleton};
use cc_protocol::CcResult;
use cc_protocol::TestVars::*;

use crate::{
    AnyoneCanPayHandler, HandlerError, ScriptHandlerRegistry, Secp256k1Blake160MultisigAllHandler,
    Secp256k1Blake160SighashAllHandler, SudtHandler,
};

const NETWORK: NetworkType = NetworkType::Testnet;

fn skeleton_with_inputs(count: usize) -> TransactionSkeleton {
    let mut skeleton = TransactionSkeleton::default();
    for _ in 0..count {
        skeleton.add_input(CellInput::default());
    }
    skeleton
}

fn sighash_lock(args: &H160) -> Script {
    SystemScript::Secp256k1Blake160SighashAll
        .info(NETWORK)
        .script(Bytes::from(args.as_bytes().to_vec()))
}

fn acp_lock(args: &H160) -> Script {
    SystemScript::AnyoneCanPay
        .info(NETWORK)
        .script(Bytes::from(args.as_bytes().to_vec()))
}

fn lock_group(script: &Script, indices: Vec<usize>) -> ScriptGroup {
    let mut group = ScriptGroup::from_lock_script(script);
    group.input_indices = indices;
    group
}

fn lock_witness_len(skeleton: &TransactionSkeleton, index: usize) -> Option<usize> {
    skeleton
        .witness_args(index)
        .and_then(|witness| witness.lock().to_opt())
        .map(|lock| lock.raw_data().len())
}

fn multisig_config() -> MultisigConfig {
    MultisigConfig::new(
        vec![
            h160!("0xbddb8434a518a5729a9ea58cd2d541afbd712999"),
            h160!("0xeac21ac6d373414aaa9ba34c469f805d48b62f86"),
        ],
        0,
        2,
    )
    .expect("multisig config")
}

struct CountingHandler {
    claim: bool,
    calls: Rc<Cell<usize>>,
}

impl ScriptHandler for CountingHandler {
    fn is_match(&self, _script: &Script) -> bool {
        self.claim
    }

    fn build_transaction(
        &self,
        _skeleton: &mut TransactionSkeleton,
        _script_group: &ScriptGroup,
        _context: &HandlerContext,
    ) -> CcResult<bool> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.claim)
    }
}

#[test]
fn sighash_sets_placeholder_and_dep() {
    let handler = Secp256k1Blake160SighashAllHandler::new(NETWORK);
    let mut skeleton = skeleton_with_inputs(3);
    let group = lock_group(&sighash_lock(&SENDER_ARGS), vec![1, 2]);
    let handled = handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .expect("build");
    assert!(handled);
    assert_eq!(lock_witness_len(&skeleton, 1), Some(65));
    assert!(skeleton.witnesses[0].is_empty());
    assert!(skeleton.witnesses[2].is_empty());
    let witness = skeleton.witness_args(1).expect("witness");
    assert!(witness
        .lock()
        .to_opt()
        .expect("lock")
        .raw_data()
        .iter()
        .all(|b| *b == 0));
    assert_eq!(
        skeleton.cell_deps,
        vec![SystemScript::Secp256k1Blake160SighashAll.cell_dep_of(NETWORK)]
    );
}

#[test]
fn sighash_ignores_foreign_scripts() {
    let handler = Secp256k1Blake160SighashAllHandler::new(NETWORK);
    let mut skeleton = skeleton_with_inputs(1);
    let foreign = Script::new_builder()
        .code_hash(H256([7u8; 32]).pack())
        .build();
    let handled = handler
        .build_transaction(&mut skeleton, &lock_group(&foreign, vec![0]), &HandlerContext::NoContext)
        .expect("build");
    assert!(!handled);

    // a sighash script used as a type script is not a signing group
    let mut type_group = ScriptGroup::from_type_script(&sighash_lock(&SENDER_ARGS));
    type_group.input_indices = vec![0];
    let handled = handler
        .build_transaction(&mut skeleton, &type_group, &HandlerContext::NoContext)
        .expect("build");
    assert!(!handled);
    assert!(skeleton.witnesses[0].is_empty());
    assert!(skeleton.cell_deps.is_empty());
}

#[test]
fn sighash_reports_out_of_range_index() {
    let handler = Secp256k1Blake160SighashAllHandler::new(NETWORK);
    let mut skeleton = skeleton_with_inputs(1);
    let group = lock_group(&sighash_lock(&SENDER_ARGS), vec![4]);
    let err = handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TransactionError>(),
        Some(TransactionError::IndexOutOfRange(4, 1))
    ));
}

#[test]
fn empty_lock_group_is_an_error() {
    let handler = Secp256k1Blake160SighashAllHandler::new(NETWORK);
    let mut skeleton = skeleton_with_inputs(1);
    let group = lock_group(&sighash_lock(&SENDER_ARGS), vec![]);
    let err = handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HandlerError>(),
        Some(HandlerError::EmptyScriptGroup(_))
    ));
}

#[test]
fn multisig_requires_context() {
    let handler = Secp256k1Blake160MultisigAllHandler::new(NETWORK);
    let config = multisig_config();
    let group = lock_group(&config.lock_script(NETWORK), vec![0]);

    let mut skeleton = skeleton_with_inputs(1);
    let handled = handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .expect("build");
    assert!(!handled);
    assert!(skeleton.witnesses[0].is_empty());
    assert!(skeleton.cell_deps.is_empty());

    let handled = handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::Multisig(config.clone()))
        .expect("build");
    assert!(handled);
    assert_eq!(lock_witness_len(&skeleton, 0), Some(4 + 20 * 2 + 65 * 2));
    let dep = skeleton.cell_deps[0].clone();
    assert_eq!(dep, SystemScript::Secp256k1Blake160MultisigAll.cell_dep_of(NETWORK));
    let index: u32 = {
        use cc_protocol::ckb_types::prelude::Unpack;
        dep.out_point().index().unpack()
    };
    assert_eq!(index, 1);
}

#[test]
fn acp_owner_spend_gets_signature_placeholder() {
    let handler = AnyoneCanPayHandler::new(NETWORK);
    let mut skeleton = skeleton_with_inputs(2);
    let group = lock_group(&acp_lock(&SENDER_ARGS), vec![1]);
    assert!(handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .expect("build"));
    assert!(skeleton.witnesses[0].is_empty());
    assert_eq!(lock_witness_len(&skeleton, 1), Some(65));
    assert_eq!(
        skeleton.cell_deps,
        vec![SystemScript::AnyoneCanPay.cell_dep_of(NETWORK)]
    );

    // sighash locks with the same args belong to the sighash handler
    let sighash = lock_group(&sighash_lock(&SENDER_ARGS), vec![0]);
    assert!(!handler
        .build_transaction(&mut skeleton, &sighash, &HandlerContext::NoContext)
        .expect("build"));
    assert!(skeleton.witnesses[0].is_empty());
}

#[test]
fn sudt_handler_only_adds_code_dep() {
    let handler = SudtHandler::new(NETWORK);
    let sudt_type = SystemScript::Sudt
        .info(NETWORK)
        .script(Bytes::from(SUDT_ARGS.as_bytes().to_vec()));
    let mut group = ScriptGroup::from_type_script(&sudt_type);
    group.input_indices = vec![0];
    group.output_indices = vec![0, 1];

    let mut skeleton = skeleton_with_inputs(1);
    assert!(handler
        .build_transaction(&mut skeleton, &group, &HandlerContext::NoContext)
        .expect("build"));
    assert!(skeleton.witnesses[0].is_empty());
    assert_eq!(skeleton.cell_deps, vec![SystemScript::Sudt.cell_dep_of(NETWORK)]);

    // the same script as a lock group is not claimed
    let lock = lock_group(&sudt_type, vec![0]);
    assert!(!handler
        .build_transaction(&mut skeleton, &lock, &HandlerContext::NoContext)
        .expect("build"));
}

#[test]
fn registry_default_order_resolves_builtin_groups() {
    let registry = ScriptHandlerRegistry::default_for(NETWORK);
    assert_eq!(registry.len(), 4);

    let mut skeleton = skeleton_with_inputs(3);
    let config = multisig_config();
    let context: HandlerContext = config.clone().into();
    let sighash = lock_group(&sighash_lock(&RECEIVER_ARGS), vec![0]);
    let multisig = lock_group(&config.lock_script(NETWORK), vec![1]);
    let acp = lock_group(&acp_lock(&SENDER_ARGS), vec![2]);
    assert!(registry.dispatch(&mut skeleton, &sighash, &context).expect("sighash"));
    assert!(registry.dispatch(&mut skeleton, &multisig, &context).expect("multisig"));
    assert!(registry.dispatch(&mut skeleton, &acp, &context).expect("acp"));
    assert_eq!(lock_witness_len(&skeleton, 0), Some(65));
    assert_eq!(lock_witness_len(&skeleton, 1), Some(config.placeholder_len()));
    assert_eq!(lock_witness_len(&skeleton, 2), Some(65));
    assert_eq!(skeleton.cell_deps.len(), 3);

    let foreign = lock_group(
        &Script::new_builder().code_hash(H256([1u8; 32]).pack()).build(),
        vec![0],
    );
    assert!(!registry
        .dispatch(&mut skeleton, &foreign, &context)
        .expect("foreign"));
}

#[test]
fn registry_stops_at_first_claim() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let registry = ScriptHandlerRegistry::new(vec![
        Box::new(CountingHandler {
            claim: false,
            calls: first.clone(),
        }),
        Box::new(CountingHandler {
            claim: true,
            calls: second.clone(),
        }),
        Box::new(Secp256k1Blake160SighashAllHandler::new(NETWORK)),
    ]);
    let mut skeleton = skeleton_with_inputs(1);
    let group = lock_group(&sighash_lock(&SENDER_ARGS), vec![0]);
    assert!(registry
        .dispatch(&mut skeleton, &group, &HandlerContext::NoContext)
        .expect("dispatch"));
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 1);
    // the sighash handler never ran
    assert!(skeleton.witnesses[0].is_empty());
    assert!(skeleton.cell_deps.is_empty());
}
