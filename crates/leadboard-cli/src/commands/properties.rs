use crate::commands::{print_json, Context, SourceArgs};
use crate::dataset;
use crate::error::not_found;
use crate::util::or_dash;
use anyhow::Result;
use clap::Args;
use leadboard_core::dto::PropertyDto;

#[derive(Debug, Args)]
pub struct PropertiesArgs {
    pub requirement_id: String,
    #[command(flatten)]
    pub sources: SourceArgs,
}

pub fn list_properties(ctx: &Context<'_>, args: PropertiesArgs) -> Result<()> {
    let data = dataset::load(ctx, &args.sources)?;
    let requirement = data
        .requirement(&args.requirement_id)
        .ok_or_else(|| not_found(format!("requirement {}", args.requirement_id.trim())))?;

    let properties: Vec<PropertyDto> = requirement
        .properties
        .iter()
        .cloned()
        .map(|property| PropertyDto::from_record(property, ctx.today))
        .collect();

    if ctx.json {
        return print_json(&properties);
    }

    if properties.is_empty() {
        println!("no matched properties for {}", requirement.id);
        return Ok(());
    }
    for (index, dto) in properties.iter().enumerate() {
        let property = &dto.property;
        let bhk = property.bhk_options();
        println!(
            "{}. {}  {}  {}  {}  {}",
            index + 1,
            property.project_name,
            or_dash(property.area.as_deref()),
            if bhk.is_empty() { "-".to_string() } else { bhk.join("/") },
            dto.price_label.as_deref().unwrap_or("-"),
            dto.timeline
        );
    }
    Ok(())
}
