//! Program state for the editor: the source being edited, what an execution engine reports
//! about it, and the recorded history used for visualization
mod editor;
mod execution;
mod language;
mod store;
mod types;
mod visualization;

pub use editor::{EditorState, LineNumber};
pub use execution::{ExecutionSpeed, ExecutionState, ExecutionStatus};
pub use language::Language;
pub use store::{Event, Store};
pub use types::{
    HeapMemory, MemoryBlock, MemoryFrame, MemoryState, StackFrame, StackMemory, StaticMemory,
    Variable, Variables,
};
pub use visualization::{ExecutionStep, VariableChange, VisualizationState, VisualizationType};
