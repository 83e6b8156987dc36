use crate::commands::{print_json, Context, SourceArgs};
use crate::dataset;
use anyhow::Result;
use clap::Args;
use leadboard_core::rules::{assess_workload, suggest_assignee, AgentLoad, WorkloadReport};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct WorkloadArgs {
    /// Agent to include even with no clients; repeatable (default: [workload] agents)
    #[arg(long = "agent", value_name = "NAME")]
    pub agents: Vec<String>,
    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Debug, Serialize)]
struct WorkloadDto<'a> {
    #[serde(flatten)]
    report: &'a WorkloadReport,
    suggested: Option<&'a AgentLoad>,
}

pub fn report(ctx: &Context<'_>, args: WorkloadArgs) -> Result<()> {
    let data = dataset::load(ctx, &args.sources)?;
    let agents = if args.agents.is_empty() {
        ctx.config.workload.agents.clone()
    } else {
        args.agents
    };
    let report = assess_workload(&agents, &data.clients, &ctx.config.workload.policy);
    let suggested = suggest_assignee(&report);

    if ctx.json {
        return print_json(&WorkloadDto {
            report: &report,
            suggested,
        });
    }

    if report.agents.is_empty() {
        println!("no agents ({} unassigned clients)", report.unassigned);
        return Ok(());
    }
    for load in &report.agents {
        println!("{}  {}  {}", load.agent, load.clients, load.status.as_str());
    }
    println!(
        "average {:.1}  assigned {}  unassigned {}  capacity {:.0}%",
        report.average, report.assigned, report.unassigned, report.capacity_utilization
    );
    if let Some(load) = suggested {
        println!("next assignee: {}", load.agent);
    }
    Ok(())
}
