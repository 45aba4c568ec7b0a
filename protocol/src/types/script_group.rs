use ckb_jsonrpc_types::Script as JsonScript;
use ckb_types::packed::Script;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptGroupType {
    Lock,
    Type,
}

/// Inputs (and, for type scripts, outputs) sharing one exact script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptGroup {
    pub script: Script,
    pub group_type: ScriptGroupType,
    pub input_indices: Vec<usize>,
    pub output_indices: Vec<usize>,
}

impl ScriptGroup {
    pub fn from_lock_script(script: &Script) -> Self {
        ScriptGroup {
            script: script.clone(),
            group_type: ScriptGroupType::Lock,
            input_indices: vec![],
            output_indices: vec![],
        }
    }

    pub fn from_type_script(script: &Script) -> Self {
        ScriptGroup {
            script: script.clone(),
            group_type: ScriptGroupType::Type,
            input_indices: vec![],
            output_indices: vec![],
        }
    }

    /// Witness slot shared by the whole group.
    pub fn canonical_index(&self) -> Option<usize> {
        self.input_indices.first().copied()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct JsonScriptGroup {
    pub script: JsonScript,
    pub group_type: ScriptGroupType,
    pub input_indices: Vec<usize>,
    pub output_indices: Vec<usize>,
}

impl From<&ScriptGroup> for JsonScriptGroup {
    fn from(group: &ScriptGroup) -> Self {
        JsonScriptGroup {
            script: group.script.clone().into(),
            group_type: group.group_type,
            input_indices: group.input_indices.clone(),
            output_indices: group.output_indices.clone(),
        }
    }
}
