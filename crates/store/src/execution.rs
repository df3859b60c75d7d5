use serde::{Deserialize, Serialize};

use crate::types::{MemoryState, StackFrame, Variables};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// Lifecycle of a program run, derived from the running/paused flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Stopped,
    Running,
    Paused,
}

/// What an execution engine reports about the running program
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionState {
    current_line: usize,
    call_stack: Vec<StackFrame>,
    variables: Variables,
    memory: MemoryState,
    is_running: bool,
    is_paused: bool,
    execution_speed: ExecutionSpeed,
}

impl ExecutionState {
    /// Fresh state whose stack memory is capped at `max_stack_size`
    pub fn with_max_stack_size(max_stack_size: usize) -> Self {
        let mut state = Self::default();
        state.memory.stack.max_size = max_stack_size;
        state
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn call_stack(&self) -> &[StackFrame] {
        &self.call_stack
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn memory(&self) -> &MemoryState {
        &self.memory
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn execution_speed(&self) -> ExecutionSpeed {
        self.execution_speed
    }

    /// A paused flag without a running program reads as stopped.
    pub fn status(&self) -> ExecutionStatus {
        match (self.is_running, self.is_paused) {
            (false, _) => ExecutionStatus::Stopped,
            (true, false) => ExecutionStatus::Running,
            (true, true) => ExecutionStatus::Paused,
        }
    }

    pub(crate) fn start(&mut self) {
        self.is_running = true;
        self.is_paused = false;
    }

    pub(crate) fn pause(&mut self) {
        if !self.is_running {
            tracing::warn!("pausing execution that is not running");
        }
        self.is_paused = true;
    }

    pub(crate) fn stop(&mut self) {
        self.is_running = false;
        self.is_paused = false;
        self.current_line = 0;
    }

    pub(crate) fn set_current_line(&mut self, line: usize) {
        self.current_line = line;
    }

    pub(crate) fn set_call_stack(&mut self, call_stack: Vec<StackFrame>) {
        self.call_stack = call_stack;
    }

    pub(crate) fn update_variables(&mut self, variables: Variables) {
        self.variables = variables;
    }

    pub(crate) fn update_memory(&mut self, memory: MemoryState) {
        self.memory = memory;
    }

    pub(crate) fn set_execution_speed(&mut self, speed: ExecutionSpeed) {
        self.execution_speed = speed;
    }
}
