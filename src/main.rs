use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_autoversion::args::Properties;
use git_autoversion::cli::orchestration::{self, Outcome};
use git_autoversion::cli::{Cli, Command};
use git_autoversion::config;
use git_autoversion::git::RefRepository;
use git_autoversion::ui;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn open_repository(cli: &Cli) -> Result<RefRepository> {
    let config = config::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let work_dir = std::env::current_dir().context("Failed to read working directory")?;
    orchestration::build_repository(&config, &work_dir)
        .with_context(|| format!("Failed to open git repository at {}", work_dir.display()))
}

fn run(cli: &Cli) -> Result<()> {
    let properties = Properties::parse(&cli.properties).context("Invalid -P property")?;

    let outcome = if cli.command.needs_repository() {
        let repo = open_repository(cli)?;
        if cli.command == Command::Prune {
            ui::display_status("Fetching latest data from remote...");
        }
        let result = orchestration::execute(&cli.command, &repo, &properties);
        // Shown even when the command failed, they often explain why
        for warning in repo.take_warnings() {
            ui::display_boundary_warning(&warning);
        }
        result.with_context(|| format!("{:?} failed", cli.command))?
    } else {
        orchestration::example_args(&properties).context("Invalid -P property")?
    };

    match outcome {
        Outcome::Version(version) => println!("{}", version),
        Outcome::BuildInfo(info) => ui::display_build_info(&info),
        Outcome::Migrated { current, merged } => ui::display_migration(&current, &merged),
        Outcome::Retired { current, tag } => ui::display_retired(&current, &tag),
        Outcome::Pruned => ui::display_success("Pruned local branches without upstream"),
        Outcome::Args(args) => ui::display_example_args(&args),
    }

    Ok(())
}
