//! Lightweight, line oriented syntax checks for the editor
//!
//! These are heuristics rather than parsers: every line is looked at on its own (apart from a
//! running brace count for the C family) and both false positives and false negatives are
//! expected. Each call rescans the whole buffer.
mod c_family;
mod debounce;
mod python;
mod scan;
mod types;

use store::Language;

pub use debounce::{DEFAULT_DELAY, Debouncer, Validation};
pub use types::{Diagnostic, Severity};

/// Check `source` as `language`, returning diagnostics in the order they were found
pub fn validate(source: &str, language: Language) -> Vec<Diagnostic> {
    let diagnostics = match language {
        Language::Python => scan::run(python::PythonScanner, source),
        Language::C | Language::Cpp => scan::run(c_family::CScanner::default(), source),
        Language::Java => scan::run(c_family::JavaScanner::default(), source),
    };
    tracing::debug!(%language, count = diagnostics.len(), "validated source");
    diagnostics
}

/// As [`validate`], for a language given by name. Unsupported languages have no diagnostics.
pub fn validate_named(source: &str, language: &str) -> Vec<Diagnostic> {
    match language.parse::<Language>() {
        Ok(language) => validate(source, language),
        Err(e) => {
            tracing::debug!(error = %e, "no validator for language");
            Vec::new()
        }
    }
}
