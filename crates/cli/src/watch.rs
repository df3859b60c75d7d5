use std::{
    path::{Path, PathBuf},
    thread,
    time::{Duration, SystemTime},
};

use config::Config;
use diagnostics::{Debouncer, Validation};
use state::files;
use store::{Event, Language};

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn report(file: &Path, validation: Validation) {
    println!(
        "-- {} ({}, {} issue(s))",
        file.display(),
        validation.language.label(),
        validation.diagnostics.len()
    );
    crate::print_diagnostics(file, &validation.diagnostics);
}

/// Poll `file` for changes, feeding each new version through the store and re-validating once the
/// file has been quiet for the configured delay.
pub(crate) fn run(
    config: &Config,
    file: &Path,
    language: Language,
    poll_ms: u64,
) -> eyre::Result<()> {
    let mut store = crate::new_store(config, language);
    let events = store.subscribe();

    let report_path: PathBuf = file.to_path_buf();
    let mut debouncer = Debouncer::spawn(config.debounce(), move |validation| {
        report(&report_path, validation);
    });

    // forward editor changes from the store to the debouncer
    thread::spawn(move || {
        for event in events {
            if let Event::Editor(editor) = event {
                debouncer.schedule(editor.code(), editor.language());
            }
        }
        tracing::debug!("store closed, stopping validation");
    });

    tracing::info!(file = %file.display(), %language, "watching for changes");
    let poll = Duration::from_millis(poll_ms);
    let mut last_modified = None;
    loop {
        let current = modified(file);
        if current != last_modified {
            last_modified = current;
            match files::import(file) {
                Ok(code) if code != store.editor().code() => store.set_code(code),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "could not read watched file"),
            }
        }
        thread::sleep(poll);
    }
}
