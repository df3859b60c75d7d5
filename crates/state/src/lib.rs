//! The state module handles persisting programs between editing sessions.
//!
//! Each language has a single save slot. Reading a slot never fails: a missing or garbled slot is
//! treated as "nothing saved".

use std::{
    io::Read,
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use eyre::Context;
use serde::{Deserialize, Serialize};
use store::Language;

pub mod files;

/// A saved program
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedProgram {
    pub code: String,
    pub language: Language,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl SavedProgram {
    /// Capture `code` with the current time
    pub fn now(code: impl Into<String>, language: Language) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            code: code.into(),
            language,
            timestamp,
        }
    }
}

/// Default location for save slots
pub fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("codeviz"))
}

/// Manages the save slots in a single directory
pub struct StateManager {
    save_dir: PathBuf,
}

impl StateManager {
    pub fn new(dir: impl Into<PathBuf>) -> eyre::Result<Self> {
        let save_dir = dir.into();
        let span = tracing::debug_span!("StateManager", state_dir = %save_dir.display());
        let _guard = span.enter();

        std::fs::create_dir_all(&save_dir)
            .with_context(|| format!("creating state directory {}", save_dir.display()))?;
        tracing::debug!("state directory ready");
        Ok(Self { save_dir })
    }

    /// Path of the slot for `language`
    pub fn slot_path(&self, language: Language) -> PathBuf {
        self.save_dir.join(format!("code-editor-{language}.json"))
    }

    /// Write `program` into its language's slot, replacing what was there
    pub fn save(&self, program: &SavedProgram) -> eyre::Result<PathBuf> {
        let path = self.slot_path(program.language);
        save_to(program, &path).wrap_err("saving program")?;
        tracing::debug!(path = %path.display(), language = %program.language, "program saved");
        Ok(path)
    }

    /// Read the slot for `language`, if it holds a readable program
    pub fn load(&self, language: Language) -> Option<SavedProgram> {
        let path = self.slot_path(language);
        if !path.exists() {
            tracing::debug!(%language, "no saved program");
            return None;
        }

        match load_from(&path) {
            Ok(program) => Some(program),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "ignoring unreadable save slot");
                None
            }
        }
    }

    /// Empty the slot for `language`. Returns whether there was anything to remove.
    pub fn remove(&self, language: Language) -> eyre::Result<bool> {
        let path = self.slot_path(language);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

pub fn save(program: &SavedProgram, writer: impl Write) -> eyre::Result<()> {
    serde_json::to_writer(writer, program).context("serialising program")?;
    Ok(())
}

pub fn save_to(program: &SavedProgram, path: impl AsRef<Path>) -> eyre::Result<()> {
    let f = std::fs::File::create(path).context("creating file for saving")?;
    save(program, &f).context("saving program")?;
    Ok(())
}

pub fn load(reader: impl Read) -> eyre::Result<SavedProgram> {
    let program = serde_json::from_reader(reader).context("reading saved program")?;
    Ok(program)
}

pub fn load_from(path: impl AsRef<Path>) -> eyre::Result<SavedProgram> {
    let path = path.as_ref();
    let f = std::fs::File::open(path)
        .with_context(|| format!("opening save slot {}", path.display()))?;
    let program = load(f).context("reading from save slot")?;
    Ok(program)
}
