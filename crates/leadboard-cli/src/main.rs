mod commands;
mod dataset;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    cache, clients, compare, completions, possession, properties, requirements, workload, Context,
};
use crate::error::{exit_code_for, report_error};
use leadboard_config as config;
use leadboard_core::time::local_today;
use leadboard_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "leadboard", version, about = "leadboard CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Reference date for possession timelines (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// List reconciled clients, one page at a time
    Clients(clients::ClientsArgs),
    /// Show a client's saved requirements
    Requirements(requirements::RequirementsArgs),
    /// Show the properties matched to a requirement
    Properties(properties::PropertiesArgs),
    /// Compare matched properties side by side
    Compare(compare::CompareArgs),
    /// Classify a possession date into a timeline bucket
    Possession(possession::PossessionArgs),
    /// Report client load per agent
    Workload(workload::WorkloadArgs),
    #[command(subcommand)]
    Cache(cache::CacheCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        today,
        command,
    } = cli;

    let today = match today.as_deref() {
        Some(raw) => util::parse_date(raw)?,
        None => local_today(),
    };

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Possession(args) => possession::classify(args, today, json),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve cache path")?;

            if verbose {
                debug!(path = %db_path.display(), "cache path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open cache {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
                today,
            };

            match command {
                Command::Clients(args) => clients::list_clients(&ctx, args),
                Command::Requirements(args) => requirements::list_requirements(&ctx, args),
                Command::Properties(args) => properties::list_properties(&ctx, args),
                Command::Compare(args) => compare::compare(&ctx, args),
                Command::Workload(args) => workload::report(&ctx, args),
                Command::Cache(cmd) => match cmd {
                    cache::CacheCommand::Show(args) => cache::show(&ctx, args),
                    cache::CacheCommand::Clear(args) => cache::clear(&ctx, args),
                },
                Command::Completions(_) | Command::Possession(_) => {
                    unreachable!("command handled before cache initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
