use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::editor::LineNumber;

/// Variables visible at a point in execution, keyed by name
pub type Variables = BTreeMap<String, Variable>;

// Serialize/Deserialize are required for exporting snapshots
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    /// Interpreter defined, not inspected here
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub function_name: String,
    pub line_number: LineNumber,
    pub local_variables: Vec<Variable>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryFrame {
    pub id: String,
    pub function_name: String,
    pub variables: Vec<Variable>,
    pub size: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryBlock {
    pub address: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub type_name: String,
    pub allocated: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackMemory {
    pub frames: Vec<MemoryFrame>,
    pub current_size: usize,
    pub max_size: usize,
}

impl StackMemory {
    pub const DEFAULT_MAX_SIZE: usize = 1024;

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            frames: Vec::new(),
            current_size: 0,
            max_size,
        }
    }
}

impl Default for StackMemory {
    fn default() -> Self {
        Self::with_max_size(Self::DEFAULT_MAX_SIZE)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeapMemory {
    pub allocated_blocks: Vec<MemoryBlock>,
    pub free_blocks: Vec<MemoryBlock>,
    pub total_size: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaticMemory {
    pub variables: Vec<Variable>,
}

/// Layout of the program's memory at one point in time
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    pub stack: StackMemory,
    pub heap: HeapMemory,
    pub static_memory: StaticMemory,
}
