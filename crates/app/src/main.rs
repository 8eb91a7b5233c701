//! Console quiz trainer.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use app::cli::{Cli, Command, LogFormatArg};
use app::logging::{LogConfig, LogFormat, init_logging};
use app::{AppConfig, Console, QuizApp};
use clap::Parser;
use services::Clock;
use storage::Storage;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(cli.data_dir, cli.max_questions, cli.seed)?;
    // Bootstrapping lives in the binary glue; services only see the repositories.
    let storage = Storage::files(config.store_paths())
        .with_context(|| format!("cannot open data directory {}", config.data_dir.display()))?;

    let command = cli.command.unwrap_or(Command::Menu);
    if let Command::Init = command {
        println!("Data directory ready at {}", config.data_dir.display());
        return Ok(());
    }

    let mut app = QuizApp::new(&config, &storage, Clock::default_clock());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    app.dispatch(&mut console, command)
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: cli.log_file.is_none() && io::stderr().is_terminal(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
    }
}
