use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use config::Config;
use diagnostics::Diagnostic;
use eyre::WrapErr;
use serde::Serialize;
use state::{SavedProgram, StateManager, files};
use store::{Language, Store};
use tracing_subscriber::EnvFilter;

mod watch;

#[derive(Debug, Parser)]
#[clap(version, about = "Syntax checks and saved programs for the code visualizer")]
struct Args {
    /// Configuration file to use instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a file and print its diagnostics
    Check {
        file: PathBuf,

        #[clap(short, long)]
        language: Option<Language>,

        /// Print diagnostics as JSON
        #[clap(long)]
        json: bool,

        #[clap(short, long = "breakpoint")]
        breakpoints: Vec<usize>,
    },
    /// Save a file into its language's slot
    Save {
        file: PathBuf,

        #[clap(short, long)]
        language: Option<Language>,
    },
    /// Load the saved program for a language
    Load {
        #[clap(short, long)]
        language: Language,

        /// Directory to export the program to, instead of printing it
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-check a file whenever it changes
    Watch {
        file: PathBuf,

        #[clap(short, long)]
        language: Option<Language>,

        /// How often to look for changes, in milliseconds
        #[clap(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
        poll_ms: u64,
    },
}

#[derive(Serialize)]
struct CheckReport<'a> {
    file: &'a Path,
    language: Language,
    breakpoints: Vec<usize>,
    diagnostics: &'a [Diagnostic],
}

/// Explicit choice, then the file extension, then the configured default
fn resolve_language(explicit: Option<Language>, file: &Path, config: &Config) -> Language {
    explicit
        .or_else(|| files::language_for_path(file))
        .unwrap_or(config.language)
}

fn new_store(config: &Config, language: Language) -> Store {
    let mut store = Store::with_settings(language, config.max_stack_size);
    store.set_animation_speed(config.animation_speed);
    store
}

fn state_manager(config: &Config) -> eyre::Result<StateManager> {
    let dir = config
        .storage_dir
        .clone()
        .or_else(state::default_dir)
        .ok_or_else(|| eyre::eyre!("cannot determine a directory for saved programs"))?;
    StateManager::new(dir).wrap_err("opening saved programs")
}

fn print_diagnostics(file: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("{}:{diagnostic}", file.display());
    }
}

/// Returns whether any error was found
fn check(
    config: &Config,
    file: &Path,
    language: Option<Language>,
    json: bool,
    breakpoints: &[usize],
) -> eyre::Result<bool> {
    let code = files::import(file)?;
    let language = resolve_language(language, file, config);

    let mut store = new_store(config, language);
    store.set_code(code);
    for line in breakpoints {
        store.toggle_breakpoint(*line);
    }

    let editor = store.editor();
    let diagnostics = diagnostics::validate(editor.code(), editor.language());

    if json {
        let report = CheckReport {
            file,
            language,
            breakpoints: editor.breakpoints().collect(),
            diagnostics: &diagnostics,
        };
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report).context("writing report")?;
        writeln!(stdout).context("writing report")?;
    } else {
        print_diagnostics(file, &diagnostics);
        let breakpoints: Vec<_> = editor.breakpoints().map(|l| l.to_string()).collect();
        if !breakpoints.is_empty() {
            println!("breakpoints: {}", breakpoints.join(", "));
        }
    }

    Ok(diagnostics.iter().any(Diagnostic::is_error))
}

fn save(config: &Config, file: &Path, language: Option<Language>) -> eyre::Result<()> {
    let code = files::import(file)?;
    let language = resolve_language(language, file, config);

    let manager = state_manager(config)?;
    let path = manager
        .save(&SavedProgram::now(code, language))
        .wrap_err("failed to save code")?;
    println!("Code saved to {}", path.display());
    Ok(())
}

fn load(config: &Config, language: Language, output: Option<&Path>) -> eyre::Result<()> {
    let manager = state_manager(config)?;
    let Some(program) = manager.load(language) else {
        println!("No saved code found for this language.");
        return Ok(());
    };

    let mut store = new_store(config, config.language);
    store.load_code_from_storage(program.code, program.language);

    let editor = store.editor();
    match output {
        Some(dir) => {
            let path = files::export(dir, editor.code(), editor.language())
                .wrap_err("failed to export code")?;
            println!("Code written to {}", path.display());
        }
        None => print!("{}", editor.code()),
    }
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install().context("installing color_eyre")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load().context("loading configuration")?,
    };
    tracing::debug!(?config, "configuration loaded");

    match args.command {
        Command::Check {
            file,
            language,
            json,
            breakpoints,
        } => {
            if check(&config, &file, language, json, &breakpoints)? {
                std::process::exit(1);
            }
        }
        Command::Save { file, language } => save(&config, &file, language)?,
        Command::Load { language, output } => load(&config, language, output.as_deref())?,
        Command::Watch {
            file,
            language,
            poll_ms,
        } => {
            let language = resolve_language(language, &file, &config);
            watch::run(&config, &file, language, poll_ms)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_resolution_order() {
        let config = Config {
            language: Language::Java,
            ..Config::default()
        };

        assert_eq!(
            resolve_language(Some(Language::C), Path::new("main.py"), &config),
            Language::C
        );
        assert_eq!(
            resolve_language(None, Path::new("main.py"), &config),
            Language::Python
        );
        assert_eq!(
            resolve_language(None, Path::new("program.txt"), &config),
            Language::Java
        );
    }

    #[test]
    fn parse_check_arguments() {
        let args = Args::try_parse_from([
            "codeviz", "check", "main.c", "-l", "cpp", "-b", "3", "-b", "1", "--json",
        ])
        .unwrap();

        let Command::Check {
            file,
            language,
            json,
            breakpoints,
        } = args.command
        else {
            panic!("expected check command");
        };
        assert_eq!(file, PathBuf::from("main.c"));
        assert_eq!(language, Some(Language::Cpp));
        assert!(json);
        assert_eq!(breakpoints, vec![3, 1]);
    }

    #[test]
    fn watch_poll_interval_must_be_positive() {
        assert!(Args::try_parse_from(["codeviz", "watch", "main.py", "--poll-ms", "0"]).is_err());

        let args = Args::try_parse_from(["codeviz", "watch", "main.py"]).unwrap();
        let Command::Watch { poll_ms, .. } = args.command else {
            panic!("expected watch command");
        };
        assert_eq!(poll_ms, 200);
    }

    #[test]
    fn reject_unknown_language() {
        assert!(Args::try_parse_from(["codeviz", "load", "--language", "rust"]).is_err());
    }

    #[test]
    fn check_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.py");
        std::fs::write(&file, "foo:\n").unwrap();

        let has_errors = check(&Config::default(), &file, None, false, &[]).unwrap();
        assert!(has_errors);

        std::fs::write(&file, "x = 1\n").unwrap();
        let has_errors = check(&Config::default(), &file, None, false, &[2]).unwrap();
        assert!(!has_errors);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("missing.c");
        assert!(check(&Config::default(), &file, None, false, &[]).is_err());
    }

    #[test]
    fn save_and_load_through_slots() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage_dir: Some(dir.path().join("slots")),
            ..Config::default()
        };
        let file = dir.path().join("Main.java");
        std::fs::write(&file, "public class Main {}\n").unwrap();

        save(&config, &file, None).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        load(&config, Language::Java, Some(out.as_path())).unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("code.java")).unwrap(),
            "public class Main {}\n"
        );

        // nothing saved for c
        load(&config, Language::C, None).unwrap();
    }
}
