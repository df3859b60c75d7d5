use crossbeam_channel::{Receiver, Sender};

use crate::{
    Language,
    editor::{EditorState, LineNumber},
    execution::{ExecutionSpeed, ExecutionState, ExecutionStatus},
    types::{MemoryState, StackFrame, Variables},
    visualization::{ExecutionStep, VisualizationState, VisualizationType},
};

/// Notification sent to subscribers after a transition has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Editor(EditorState),
    Execution(ExecutionStatus),
    Visualization,
}

/// Owner of the editor, execution and visualization state
///
/// Every mutation goes through one of the named transitions below, after which each subscriber
/// is notified with an [`Event`] describing the slice that changed.
#[derive(Debug, Default)]
pub struct Store {
    editor: EditorState,
    execution: ExecutionState,
    visualization: VisualizationState,
    subscribers: Vec<Sender<Event>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store starting with the given language and stack size limit
    pub fn with_settings(language: Language, max_stack_size: usize) -> Self {
        let mut editor = EditorState::default();
        editor.set_language(language);
        Self {
            editor,
            execution: ExecutionState::with_max_stack_size(max_stack_size),
            ..Self::default()
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn execution(&self) -> &ExecutionState {
        &self.execution
    }

    pub fn visualization(&self) -> &VisualizationState {
        &self.visualization
    }

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn editor_changed(&mut self) {
        self.notify(Event::Editor(self.editor.clone()));
    }

    fn execution_changed(&mut self) {
        self.notify(Event::Execution(self.execution.status()));
    }

    fn visualization_changed(&mut self) {
        self.notify(Event::Visualization);
    }

    // editor

    pub fn set_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        tracing::trace!(bytes = code.len(), "setting code");
        self.editor.set_code(code);
        self.editor_changed();
    }

    pub fn set_language(&mut self, language: Language) {
        tracing::debug!(%language, "setting language");
        self.editor.set_language(language);
        self.editor_changed();
    }

    pub fn toggle_breakpoint(&mut self, line: LineNumber) {
        let set = self.editor.toggle_breakpoint(line);
        tracing::debug!(line, set, "toggled breakpoint");
        self.editor_changed();
    }

    /// Highlight `line` in the editor, or clear the highlight
    pub fn set_current_line(&mut self, line: Option<LineNumber>) {
        self.editor.set_current_line(line);
        self.editor_changed();
    }

    pub fn clear_breakpoints(&mut self) {
        tracing::debug!("clearing breakpoints");
        self.editor.clear_breakpoints();
        self.editor_changed();
    }

    /// Replace the program wholesale, as when starting a fresh editing session
    pub fn load_code_from_storage(&mut self, code: impl Into<String>, language: Language) {
        tracing::debug!(%language, "loading program");
        self.editor.load(code.into(), language);
        self.editor_changed();
    }

    // execution

    pub fn start_execution(&mut self) {
        tracing::debug!("starting execution");
        self.execution.start();
        self.execution_changed();
    }

    pub fn pause_execution(&mut self) {
        tracing::debug!("pausing execution");
        self.execution.pause();
        self.execution_changed();
    }

    pub fn stop_execution(&mut self) {
        tracing::debug!("stopping execution");
        self.execution.stop();
        self.execution_changed();
    }

    /// Line the execution engine is currently at
    pub fn set_execution_line(&mut self, line: usize) {
        self.execution.set_current_line(line);
        self.execution_changed();
    }

    pub fn set_call_stack(&mut self, call_stack: Vec<StackFrame>) {
        self.execution.set_call_stack(call_stack);
        self.execution_changed();
    }

    pub fn update_variables(&mut self, variables: Variables) {
        tracing::trace!(count = variables.len(), "updating variables");
        self.execution.update_variables(variables);
        self.execution_changed();
    }

    pub fn update_memory(&mut self, memory: MemoryState) {
        self.execution.update_memory(memory);
        self.execution_changed();
    }

    pub fn set_execution_speed(&mut self, speed: ExecutionSpeed) {
        tracing::debug!(?speed, "setting execution speed");
        self.execution.set_execution_speed(speed);
        self.execution_changed();
    }

    // visualization

    pub fn toggle_visualization(&mut self, kind: VisualizationType) {
        let active = self.visualization.toggle(kind);
        tracing::debug!(?kind, active, "toggled visualization");
        self.visualization_changed();
    }

    pub fn set_animation_speed(&mut self, speed: f64) {
        if self.visualization.set_animation_speed(speed) {
            self.visualization_changed();
        }
    }

    pub fn start_recording(&mut self) {
        tracing::debug!("starting recording");
        self.visualization.start_recording();
        self.visualization_changed();
    }

    pub fn stop_recording(&mut self) {
        tracing::debug!(
            steps = self.visualization.history().len(),
            "stopping recording"
        );
        self.visualization.stop_recording();
        self.visualization_changed();
    }

    pub fn add_execution_step(&mut self, step: ExecutionStep) {
        if self.visualization.add_step(step) {
            self.visualization_changed();
        } else {
            tracing::trace!("not recording, dropping execution step");
        }
    }

    /// Move to a recorded step; out of range values are clamped
    pub fn set_current_step(&mut self, step: i64) {
        self.visualization.set_current_step(step);
        self.visualization_changed();
    }
}
