//! Fetch, cache and reconcile the two upstream sources.
//!
//! A successful fetch replaces the cached snapshot for that source. When a
//! fetch fails, or `--offline` is given, the last snapshot is used instead so
//! the client list can still be shown.

use crate::commands::{Context, SourceArgs};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use leadboard_config::AppConfig;
use leadboard_core::reconcile::attach_match_counts;
use leadboard_core::time::{format_timestamp_datetime, now_utc};
use leadboard_core::{ClientRecord, Reconciler, RequirementRecord, SourceBatch, SourceTag};
use leadboard_store::Store;
use leadboard_sync::{FileSource, HttpSource, PayloadSource};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Live,
    Cached { fetched_at: i64 },
    Missing,
}

impl Freshness {
    pub fn is_stale(self) -> bool {
        !matches!(self, Freshness::Live)
    }
}

#[derive(Debug)]
struct Fetched {
    records: Vec<Value>,
    freshness: Freshness,
}

#[derive(Debug)]
pub struct Dataset {
    pub clients: Vec<ClientRecord>,
    pub requirements: Vec<RequirementRecord>,
    pub leads: Freshness,
    pub requirement_store: Freshness,
}

impl Dataset {
    pub fn is_stale(&self) -> bool {
        self.leads.is_stale() || self.requirement_store.is_stale()
    }

    pub fn requirement(&self, id: &str) -> Option<&RequirementRecord> {
        let id = id.trim();
        self.requirements
            .iter()
            .find(|requirement| requirement.id == id)
    }
}

pub fn load(ctx: &Context<'_>, args: &SourceArgs) -> Result<Dataset> {
    let leads = fetch_or_cached(
        ctx.store,
        source_for(ctx.config, args.leads.clone(), SourceTag::LeadCrm),
        SourceTag::LeadCrm,
        args.offline,
    )?;
    let requirements = fetch_or_cached(
        ctx.store,
        source_for(
            ctx.config,
            args.requirements.clone(),
            SourceTag::RequirementStore,
        ),
        SourceTag::RequirementStore,
        args.offline,
    )?;

    if !args.offline
        && leads.freshness == Freshness::Missing
        && requirements.freshness == Freshness::Missing
    {
        return Err(invalid_input(
            "no sources configured: pass --leads/--requirements or set [sources] in config",
        ));
    }

    let reconciler = Reconciler::new(&ctx.config.aliases).with_id_rule(ctx.config.id_rule);
    let requirement_set =
        reconciler.reconcile_requirements(SourceTag::RequirementStore, &requirements.records);
    debug!(
        records = requirement_set.records.len(),
        skipped = requirement_set.skipped,
        duplicates = requirement_set.duplicates,
        "requirements reconciled"
    );

    let batches = [
        SourceBatch::new(SourceTag::LeadCrm, leads.records),
        SourceBatch::new(SourceTag::RequirementStore, requirements.records),
    ];
    let client_set = reconciler.reconcile_clients(&batches);
    debug!(
        records = client_set.records.len(),
        skipped = client_set.skipped,
        duplicates = client_set.duplicates,
        "clients reconciled"
    );

    Ok(Dataset {
        clients: attach_match_counts(client_set.records, &requirement_set.records),
        requirements: requirement_set.records,
        leads: leads.freshness,
        requirement_store: requirements.freshness,
    })
}

fn source_for(
    config: &AppConfig,
    path_override: Option<PathBuf>,
    tag: SourceTag,
) -> Option<Box<dyn PayloadSource>> {
    let sources = &config.sources;
    let (configured_path, endpoint) = match tag {
        SourceTag::LeadCrm => (&sources.leads_path, &sources.leads_endpoint),
        SourceTag::RequirementStore => (&sources.requirements_path, &sources.requirements_endpoint),
    };

    if let Some(path) = path_override.or_else(|| configured_path.clone()) {
        return Some(Box::new(FileSource::new(path, tag)));
    }

    sources.base_url.as_ref().map(|base_url| {
        Box::new(HttpSource::new(
            base_url.clone(),
            endpoint.clone(),
            sources.token.clone(),
            Duration::from_secs(sources.timeout_secs),
            tag,
        )) as Box<dyn PayloadSource>
    })
}

fn fetch_or_cached(
    store: &Store,
    source: Option<Box<dyn PayloadSource>>,
    tag: SourceTag,
    offline: bool,
) -> Result<Fetched> {
    let source = match source {
        Some(source) if !offline => source,
        Some(_) => return cached(store, tag),
        None => {
            debug!(source = %tag, "no source configured");
            return cached(store, tag);
        }
    };

    let origin = source.origin();
    match source.fetch_records() {
        Ok(records) => {
            store
                .snapshots()
                .replace(tag, &origin, now_utc(), &records)
                .with_context(|| format!("cache {tag} snapshot"))?;
            debug!(source = %tag, origin = %origin, records = records.len(), "fetched");
            Ok(Fetched {
                records,
                freshness: Freshness::Live,
            })
        }
        Err(err) => match store.snapshots().load(tag)? {
            Some(snapshot) => {
                warn!(
                    source = %tag,
                    origin = %origin,
                    error = %err,
                    cached_at = %format_timestamp_datetime(snapshot.meta.fetched_at),
                    "fetch failed, showing cached snapshot"
                );
                Ok(Fetched {
                    records: snapshot.records,
                    freshness: Freshness::Cached {
                        fetched_at: snapshot.meta.fetched_at,
                    },
                })
            }
            None => Err(anyhow::Error::new(err).context(format!("fetch {tag} from {origin}"))),
        },
    }
}

fn cached(store: &Store, tag: SourceTag) -> Result<Fetched> {
    match store.snapshots().load(tag)? {
        Some(snapshot) => {
            debug!(
                source = %tag,
                records = snapshot.records.len(),
                "using cached snapshot"
            );
            Ok(Fetched {
                records: snapshot.records,
                freshness: Freshness::Cached {
                    fetched_at: snapshot.meta.fetched_at,
                },
            })
        }
        None => {
            debug!(source = %tag, "no cached snapshot");
            Ok(Fetched {
                records: Vec::new(),
                freshness: Freshness::Missing,
            })
        }
    }
}
