use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::logic::Session;
use crate::model::AppConfig;
use crate::storage::{Storage, data_dir};
use crate::util::prompt_input;

const LOG_ENV: &str = "DOTHINGS_LOG";
const PROMPT: &str = "Please enter a command: ";

pub fn run() {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let storage = Storage::new(data_dir(cli.data_dir.as_deref()));
    debug!(dir = %storage.dir().display(), "using data directory");

    let mut session = open_session(storage);
    session.set_color(resolve_color(&cli, &session.state().config));

    match cli.command_line() {
        Some(line) => println!("{}", session.execute(&line)),
        None => run_loop(&mut session),
    }
}

/// Exits when the task file exists but cannot be read, so a later save never
/// overwrites tasks that were not loaded.
fn open_session(storage: Storage) -> Session {
    let path = storage.tasks_path();
    match Session::open(storage) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, path = %path.display(), "failed to load tasks");
            eprintln!("Error, tasks could not be loaded from {}: {err}", path.display());
            std::process::exit(1);
        }
    }
}

fn run_loop(session: &mut Session) {
    while let Some(input) = prompt_input(PROMPT) {
        let feedback = session.execute(&input);
        println!("{feedback}");
        if feedback.exit {
            break;
        }
    }
}

fn resolve_color(cli: &Cli, config: &AppConfig) -> bool {
    if cli.no_color {
        return false;
    }
    config.color && std::io::stdout().is_terminal()
}

fn install_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
