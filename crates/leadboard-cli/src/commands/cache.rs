use crate::commands::{print_json, Context};
use crate::util::parse_source;
use anyhow::Result;
use clap::{Args, Subcommand};
use leadboard_core::time::format_timestamp_datetime;
use leadboard_core::SourceTag;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// List cached snapshots
    Show(CacheShowArgs),
    /// Drop cached snapshots
    Clear(CacheClearArgs),
}

#[derive(Debug, Args)]
pub struct CacheShowArgs {}

#[derive(Debug, Args)]
pub struct CacheClearArgs {
    /// leads | requirements (default: both)
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
struct SnapshotDto {
    id: String,
    source: SourceTag,
    origin: String,
    fetched_at: i64,
    records: usize,
}

pub fn show(ctx: &Context<'_>, _args: CacheShowArgs) -> Result<()> {
    let snapshots: Vec<SnapshotDto> = ctx
        .store
        .snapshots()
        .list()?
        .into_iter()
        .map(|meta| SnapshotDto {
            id: meta.id.to_string(),
            source: meta.source,
            origin: meta.origin,
            fetched_at: meta.fetched_at,
            records: meta.record_count,
        })
        .collect();

    if ctx.json {
        return print_json(&snapshots);
    }

    if snapshots.is_empty() {
        println!("cache is empty");
        return Ok(());
    }
    for snapshot in snapshots {
        println!(
            "{}  {} records  fetched {}  from {}",
            snapshot.source,
            snapshot.records,
            format_timestamp_datetime(snapshot.fetched_at),
            snapshot.origin
        );
    }
    Ok(())
}

pub fn clear(ctx: &Context<'_>, args: CacheClearArgs) -> Result<()> {
    let source = args.source.as_deref().map(parse_source).transpose()?;
    let removed = ctx.store.snapshots().clear(source)?;

    if ctx.json {
        return print_json(&serde_json::json!({ "removed": removed }));
    }
    println!("removed {removed} cached snapshot(s)");
    Ok(())
}
