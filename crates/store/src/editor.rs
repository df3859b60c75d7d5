use std::collections::BTreeSet;

use serde::Serialize;

use crate::Language;

/// 1-based line number in the source buffer
pub type LineNumber = usize;

/// Editable program: source text, language and line annotations
///
/// Only serializable: a slice is changed through its transitions, never rebuilt from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    code: String,
    language: Language,
    breakpoints: BTreeSet<LineNumber>,
    current_line: Option<LineNumber>,
}

impl EditorState {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Active breakpoints in ascending order
    pub fn breakpoints(&self) -> impl Iterator<Item = LineNumber> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn has_breakpoint(&self, line: LineNumber) -> bool {
        self.breakpoints.contains(&line)
    }

    /// The highlighted line. Not re-validated against the buffer when the code changes.
    pub fn current_line(&self) -> Option<LineNumber> {
        self.current_line
    }

    pub(crate) fn set_code(&mut self, code: String) {
        self.code = code;
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        self.language = language;
        self.reset_annotations();
    }

    /// Returns `true` if the breakpoint is now set
    pub(crate) fn toggle_breakpoint(&mut self, line: LineNumber) -> bool {
        if self.breakpoints.remove(&line) {
            false
        } else {
            self.breakpoints.insert(line);
            true
        }
    }

    pub(crate) fn set_current_line(&mut self, line: Option<LineNumber>) {
        self.current_line = line;
    }

    pub(crate) fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub(crate) fn load(&mut self, code: String, language: Language) {
        self.code = code;
        self.language = language;
        self.reset_annotations();
    }

    // line annotations are tied to the previous buffer
    fn reset_annotations(&mut self) {
        self.breakpoints.clear();
        self.current_line = None;
    }
}
