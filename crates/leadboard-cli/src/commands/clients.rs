use crate::commands::{print_json, Context, SourceArgs};
use crate::dataset::{self, Dataset, Freshness};
use crate::util::or_dash;
use anyhow::Result;
use clap::Args;
use leadboard_core::time::{format_timestamp_date, format_timestamp_datetime};
use leadboard_core::{ClientRecord, ListView, Page, SiteVisitFilter, SortOrder};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ClientsArgs {
    /// Case-insensitive text matched against name, phone, location and preferences
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// any | scheduled | none
    #[arg(long, default_value = "any")]
    pub site_visit: SiteVisitFilter,
    /// date-desc | date-asc | name-asc | name-desc
    #[arg(long, default_value = "date-desc")]
    pub sort: SortOrder,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Debug, Serialize)]
struct ClientPageDto<'a> {
    #[serde(flatten)]
    page: Page<&'a ClientRecord>,
    stale: bool,
}

pub fn list_clients(ctx: &Context<'_>, args: ClientsArgs) -> Result<()> {
    let data = dataset::load(ctx, &args.sources)?;

    let mut view = ListView::new(ctx.config.page_size)?;
    view.set_sort(args.sort);
    view.set_search(args.search.unwrap_or_default());
    view.set_priority(args.priority);
    view.set_site_visit(args.site_visit);
    view.set_page(args.page)?;

    let viewer = ctx.config.session.viewer_context();
    let page = view.compute(&data.clients, &viewer);

    if ctx.json {
        return print_json(&ClientPageDto {
            page,
            stale: data.is_stale(),
        });
    }

    print_staleness(&data);
    if page.total == 0 {
        println!("no clients");
        return Ok(());
    }
    for client in &page.items {
        println!("{}", format_client_line(client));
    }
    println!(
        "page {}/{} ({} clients)",
        page.page, page.page_count, page.total
    );
    Ok(())
}

fn format_client_line(client: &ClientRecord) -> String {
    let last_contact = client
        .last_contact
        .map(format_timestamp_date)
        .unwrap_or_else(|| "-".to_string());
    let visit = client
        .site_visit_at
        .map(|ts| format!("  visit {}", format_timestamp_datetime(ts)))
        .unwrap_or_default();
    format!(
        "{}  {}  {}  {}  {}  priority {}  matches {}  last {}{}",
        client.name,
        client.phone,
        client.location,
        client.preferences.configuration,
        client.preferences.budget,
        or_dash(client.priority.as_deref()),
        client.matched_count,
        last_contact,
        visit
    )
}

fn print_staleness(data: &Dataset) {
    for (label, freshness) in [("leads", data.leads), ("requirements", data.requirement_store)] {
        if let Freshness::Cached { fetched_at } = freshness {
            eprintln!(
                "showing cached {label} from {}",
                format_timestamp_datetime(fetched_at)
            );
        }
    }
}
