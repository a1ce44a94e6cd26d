mod cli;
mod commands;
mod config;
mod paths;
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
    pub verbose: u8,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
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
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_path: cli.config,
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(ctx: &Context, command: Command) -> Result<()> {
    log::trace!("verbosity {}", ctx.verbose);

    match command {
        Command::InstallRequirements(args) => commands::install::run(ctx, args),
        Command::PlaybookRun(args) => commands::playbook::run(ctx, args),
        Command::Config(cmd) => commands::config::run(ctx, cmd),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "runbook", &mut io::stdout());
            Ok(())
        }
    }
}

/// Exit code for a failed run: the child's own status when Ansible failed,
/// 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ansiblekit::Error>()
        .map_or(1, ansiblekit::Error::exit_code)
}
