use serde::{Deserialize, Serialize};

use crate::{editor::LineNumber, types::MemoryState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Memory,
    Variables,
    Loops,
    Recursion,
    Graph,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableChange {
    pub name: String,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One recorded step of a program run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub line_number: LineNumber,
    pub memory_state: MemoryState,
    pub variable_changes: Vec<VariableChange>,
    pub visualization_data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationState {
    active_visualizations: Vec<VisualizationType>,
    animation_speed: f64,
    is_recording: bool,
    history: Vec<ExecutionStep>,
    current_step: usize,
}

impl Default for VisualizationState {
    fn default() -> Self {
        Self {
            active_visualizations: vec![VisualizationType::Memory, VisualizationType::Variables],
            animation_speed: 1.0,
            is_recording: false,
            history: Vec::new(),
            current_step: 0,
        }
    }
}

impl VisualizationState {
    pub fn active_visualizations(&self) -> &[VisualizationType] {
        &self.active_visualizations
    }

    pub fn is_active(&self, kind: VisualizationType) -> bool {
        self.active_visualizations.contains(&kind)
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn history(&self) -> &[ExecutionStep] {
        &self.history
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The step at `current_step`, if anything has been recorded
    pub fn current(&self) -> Option<&ExecutionStep> {
        self.history.get(self.current_step)
    }

    /// Returns `true` if `kind` is now active
    pub(crate) fn toggle(&mut self, kind: VisualizationType) -> bool {
        match self.active_visualizations.iter().position(|k| *k == kind) {
            Some(index) => {
                self.active_visualizations.remove(index);
                false
            }
            None => {
                self.active_visualizations.push(kind);
                true
            }
        }
    }

    /// Returns `false` and leaves the speed untouched unless `speed` is a positive number
    pub(crate) fn set_animation_speed(&mut self, speed: f64) -> bool {
        if !(speed.is_finite() && speed > 0.0) {
            tracing::warn!(speed, "ignoring non-positive animation speed");
            return false;
        }
        self.animation_speed = speed;
        true
    }

    pub(crate) fn start_recording(&mut self) {
        self.is_recording = true;
        self.history.clear();
        self.current_step = 0;
    }

    pub(crate) fn stop_recording(&mut self) {
        self.is_recording = false;
    }

    /// Returns `false` when not recording, in which case the step is dropped
    pub(crate) fn add_step(&mut self, step: ExecutionStep) -> bool {
        if !self.is_recording {
            return false;
        }
        self.history.push(step);
        self.current_step = self.history.len() - 1;
        true
    }

    pub(crate) fn set_current_step(&mut self, step: i64) {
        let last = self.history.len().saturating_sub(1);
        self.current_step = usize::try_from(step.max(0)).unwrap_or(usize::MAX).min(last);
    }
}
