use crate::commands::{print_json, Context, SourceArgs};
use crate::dataset;
use anyhow::Result;
use clap::Args;
use leadboard_core::reconcile::requirements_for_phone;

#[derive(Debug, Args)]
pub struct RequirementsArgs {
    /// Client phone number; formatting and country prefix are ignored
    pub phone: String,
    #[command(flatten)]
    pub sources: SourceArgs,
}

pub fn list_requirements(ctx: &Context<'_>, args: RequirementsArgs) -> Result<()> {
    let data = dataset::load(ctx, &args.sources)?;
    let requirements = requirements_for_phone(&data.requirements, &args.phone);

    if ctx.json {
        return print_json(&requirements);
    }

    if requirements.is_empty() {
        println!("no requirements for {}", args.phone.trim());
        return Ok(());
    }
    for requirement in requirements {
        let prefs = &requirement.preferences;
        println!(
            "{}  {}  [{}]  {} {} in {}  budget {}  possession {}  {} matched",
            requirement.id,
            requirement.name,
            requirement.source,
            prefs.configuration,
            prefs.property_type,
            prefs.location,
            prefs.budget,
            prefs.possession,
            requirement.properties.len()
        );
    }
    Ok(())
}
