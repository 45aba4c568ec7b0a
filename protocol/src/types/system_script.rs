use std::collections::HashMap;

use ckb_types::core::{DepType, ScriptHashType};
use ckb_types::packed::{CellDep, OutPoint, Script};
use ckb_types::prelude::{Builder, Entity, Pack};
use ckb_types::{bytes::Bytes, h256, H256};
use lazy_static::lazy_static;

use crate::types::network::NetworkType;

/// Script templates whose deployment is known for every supported network.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum SystemScript {
    Secp256k1Blake160SighashAll,
    Secp256k1Blake160MultisigAll,
    AnyoneCanPay,
    Sudt,
}

#[derive(Debug, Clone)]
pub struct SystemScriptInfo {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    pub dep_tx_hash: H256,
    pub dep_index: u32,
    pub dep_type: DepType,
}

impl SystemScriptInfo {
    pub fn cell_dep(&self) -> CellDep {
        CellDep::new_builder()
            .out_point(OutPoint::new(self.dep_tx_hash.pack(), self.dep_index))
            .dep_type(self.dep_type.into())
            .build()
    }

    pub fn script(&self, args: Bytes) -> Script {
        Script::new_builder()
            .code_hash(self.code_hash.pack())
            .hash_type(self.hash_type.into())
            .args(args.pack())
            .build()
    }
}

const SECP256K1_CODE_HASH: H256 =
    h256!("0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8");
const MULTISIG_CODE_HASH: H256 =
    h256!("0x5c5069eb0857efc65e1bca0c07df34c31663b3622fd3876c876320fc9634e2a8");

const MAINNET_SECP256K1_DEP_GROUP: H256 =
    h256!("0x71a7ba8fc96349fea0ed3a5c47992e3b4084b031a42264a018e0072e8172e46c");
const TESTNET_SECP256K1_DEP_GROUP: H256 =
    h256!("0xf8de3bb47d055cdf460d93a2a6e1b05f7432f9777c8c474abf4eec1d4aee5d37");

const MAINNET_ACP_CODE_HASH: H256 =
    h256!("0xd369597ff47f29fbc0d47d2e3775370d1250b85140c670e4718af712983a2354");
const MAINNET_ACP_DEP_GROUP: H256 =
    h256!("0x4153a2014952d7cac45f285ce9a7c5c0c0e1b21f2d378b82ac1433cb11c25c4d");
const TESTNET_ACP_CODE_HASH: H256 =
    h256!("0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356");
const TESTNET_ACP_DEP_GROUP: H256 =
    h256!("0xec26b0f85ed839ece5f11c4c4e837ec359f5adc4420410f6453b1f6b60fb96a6");

const MAINNET_SUDT_CODE_HASH: H256 =
    h256!("0x5e7a36a77e68eecc013dfa2fe6a23f3b6c344b04005808694ae6dd45eea4cfd5");
const MAINNET_SUDT_DEP: H256 =
    h256!("0xc7813f6a415144643970c2e88e0bb6ca6a8edc5dd7c1022746f628284a9936d5");
const TESTNET_SUDT_CODE_HASH: H256 =
    h256!("0xc5e5dcf215925f7ef4dfaf5f4b4f105bc321c02776d6e7d52a1db3fcd9d011a4");
const TESTNET_SUDT_DEP: H256 =
    h256!("0xe12877ebd2c3c364dc46c5c992bcfaf4fee33fa13eebdf82c591fc9825aab769");

fn info(
    code_hash: H256,
    hash_type: ScriptHashType,
    dep_tx_hash: H256,
    dep_index: u32,
    dep_type: DepType,
) -> SystemScriptInfo {
    SystemScriptInfo {
        code_hash,
        hash_type,
        dep_tx_hash,
        dep_index,
        dep_type,
    }
}

lazy_static! {
    static ref SYSTEM_SCRIPTS: HashMap<(NetworkType, SystemScript), SystemScriptInfo> = {
        use NetworkType::*;
        use SystemScript::*;
        let table = vec![
            (
                (Mainnet, Secp256k1Blake160SighashAll),
                info(SECP256K1_CODE_HASH, ScriptHashType::Type, MAINNET_SECP256K1_DEP_GROUP, 0, DepType::DepGroup),
            ),
            (
                (Mainnet, Secp256k1Blake160MultisigAll),
                info(MULTISIG_CODE_HASH, ScriptHashType::Type, MAINNET_SECP256K1_DEP_GROUP, 1, DepType::DepGroup),
            ),
            (
                (Mainnet, AnyoneCanPay),
                info(MAINNET_ACP_CODE_HASH, ScriptHashType::Type, MAINNET_ACP_DEP_GROUP, 0, DepType::DepGroup),
            ),
            (
                (Mainnet, Sudt),
                info(MAINNET_SUDT_CODE_HASH, ScriptHashType::Type, MAINNET_SUDT_DEP, 0, DepType::Code),
            ),
            (
                (Testnet, Secp256k1Blake160SighashAll),
                info(SECP256K1_CODE_HASH, ScriptHashType::Type, TESTNET_SECP256K1_DEP_GROUP, 0, DepType::DepGroup),
            ),
            (
                (Testnet, Secp256k1Blake160MultisigAll),
                info(MULTISIG_CODE_HASH, ScriptHashType::Type, TESTNET_SECP256K1_DEP_GROUP, 1, DepType::DepGroup),
            ),
            (
                (Testnet, AnyoneCanPay),
                info(TESTNET_ACP_CODE_HASH, ScriptHashType::Type, TESTNET_ACP_DEP_GROUP, 0, DepType::DepGroup),
            ),
            (
                (Testnet, Sudt),
                info(TESTNET_SUDT_CODE_HASH, ScriptHashType::Type, TESTNET_SUDT_DEP, 0, DepType::Code),
            ),
        ];
        table.into_iter().collect()
    };
}

impl SystemScript {
    pub const ALL: [SystemScript; 4] = [
        SystemScript::Secp256k1Blake160SighashAll,
        SystemScript::Secp256k1Blake160MultisigAll,
        SystemScript::AnyoneCanPay,
        SystemScript::Sudt,
    ];

    /// Every (network, script) pair is present in the table.
    pub fn info(self, network: NetworkType) -> &'static SystemScriptInfo {
        &SYSTEM_SCRIPTS[&(network, self)]
    }

    pub fn code_hash(self, network: NetworkType) -> &'static H256 {
        &self.info(network).code_hash
    }

    pub fn cell_dep_of(self, network: NetworkType) -> CellDep {
        self.info(network).cell_dep()
    }

    pub fn from_code_hash(network: NetworkType, code_hash: &[u8]) -> Option<SystemScript> {
        Self::ALL
            .into_iter()
            .find(|script| script.code_hash(network).as_bytes() == code_hash)
    }

    pub fn is_script(self, network: NetworkType, script: &Script) -> bool {
        script.code_hash().as_slice() == self.code_hash(network).as_bytes()
    }
}
