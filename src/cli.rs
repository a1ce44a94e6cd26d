use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runbook")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Install Ansible requirements and run the deploy playbook", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default search
    #[arg(short, long, global = true, env = "RUNBOOK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install roles and collections from the requirements file (ansible-galaxy)
    InstallRequirements(InstallArgs),

    /// Apply the playbook to the inventory (ansible-playbook)
    PlaybookRun(PlaybookArgs),

    /// Inspect or create the runbook config file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct InstallArgs {
    /// Reinstall everything, even if already present
    #[arg(short, long)]
    pub force: bool,

    /// Print the command without running it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct PlaybookArgs {
    /// Include tasks tagged "security" (skipped by default)
    #[arg(short, long)]
    pub security: bool,

    /// Print the command without running it
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved settings and where they came from
    Show,

    /// Print the path of the config file in use
    Path,

    /// Write a config file with the default settings
    Init {
        /// Where to write it (default: ./runbook.toml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
