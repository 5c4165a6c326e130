mod cli;
mod commands;
mod config;
mod module;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        quiet: cli.quiet,
        config: cli.config,
    };

    match run(&ctx, cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            if let Some(err) = e.downcast_ref::<maskit::Error>() {
                ui::hint(err.category().advice());
            }
            ExitCode::FAILURE
        }
    }
}

/// Dispatch a command; `Ok(false)` means failure was already reported.
fn run(ctx: &Context, command: Command) -> Result<bool> {
    match command {
        Command::Ensure(args) => return commands::ensure::run(ctx, args),
        Command::Module { args_file } => return Ok(!commands::module::run(ctx, &args_file)?),
        Command::List { mas_path, json } => commands::list::run(ctx, mas_path.as_deref(), json)?,
        Command::Catalog => commands::catalog::run(ctx)?,
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "mas-ensure", &mut io::stdout());
        }
    }
    Ok(true)
}
