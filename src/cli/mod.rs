//! Command-line surface

pub mod orchestration;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "git-autoversion",
    version,
    about = "Infer semantic versions from git branch topology and manage release branches"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(
        short = 'P',
        value_name = "KEY=VALUE",
        global = true,
        help = "Build property, may be repeated"
    )]
    pub properties: Vec<String>,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the version name of the checked out branch
    Version,
    /// Print versionName and versionCode
    Info,
    /// Merge upstream release lines into the checked out branch and push
    Migrate,
    /// Tag, merge into master and delete the checked out release branch
    Retire,
    /// Fetch and delete local branches whose upstream is gone
    Prune,
    /// Print the example build properties
    Args,
}

impl Command {
    /// Whether the command needs a git work tree
    pub fn needs_repository(&self) -> bool {
        !matches!(self, Command::Args)
    }
}
