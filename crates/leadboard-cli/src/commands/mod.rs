use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Args};
use leadboard_config::AppConfig;
use leadboard_store::Store;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod cache;
pub mod clients;
pub mod compare;
pub mod completions;
pub mod possession;
pub mod properties;
pub mod requirements;
pub mod workload;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
    pub today: NaiveDate,
}

/// Where upstream payloads come from for one invocation.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Lead CRM export to read instead of the configured source (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub leads: Option<PathBuf>,
    /// Requirements export to read instead of the configured source
    #[arg(long, value_name = "FILE")]
    pub requirements: Option<PathBuf>,
    /// Skip fetching and use the cached snapshot
    #[arg(long, action = ArgAction::SetTrue)]
    pub offline: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
