//! Importing programs from, and exporting them to, plain text files

use std::path::{Path, PathBuf};

use eyre::Context;
use store::Language;

/// Extension used when exporting, for a language given by name
pub fn extension_for(language: &str) -> &'static str {
    language
        .parse::<Language>()
        .map(Language::file_extension)
        .unwrap_or(".txt")
}

/// Guess the language of a file from its extension
pub fn language_for_path(path: impl AsRef<Path>) -> Option<Language> {
    let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "py" => Some(Language::Python),
        "c" | "h" => Some(Language::C),
        "cpp" | "cc" | "cxx" | "hpp" => Some(Language::Cpp),
        "java" => Some(Language::Java),
        _ => None,
    }
}

/// Read a program verbatim. The contents are not checked in any way.
pub fn import(path: impl AsRef<Path>) -> eyre::Result<String> {
    let path = path.as_ref();
    let code = std::fs::read_to_string(path)
        .with_context(|| format!("reading program from {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = code.len(), "imported program");
    Ok(code)
}

/// Write `code` to `code<ext>` inside `dir`, returning the written path
pub fn export(dir: impl AsRef<Path>, code: &str, language: Language) -> eyre::Result<PathBuf> {
    let path = dir
        .as_ref()
        .join(format!("code{}", language.file_extension()));
    std::fs::write(&path, code)
        .with_context(|| format!("writing program to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "exported program");
    Ok(path)
}
