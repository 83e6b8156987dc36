use crate::commands::{print_json, Context, SourceArgs};
use crate::dataset;
use crate::error::{invalid_input, not_found};
use anyhow::Result;
use clap::Args;
use leadboard_core::compare::compare_properties;
use leadboard_core::PropertyRecord;

#[derive(Debug, Args)]
pub struct CompareArgs {
    pub requirement_id: String,
    /// 1-based position from `properties`; repeat to pick several (default: all)
    #[arg(long = "index", value_name = "N")]
    pub indexes: Vec<usize>,
    #[command(flatten)]
    pub sources: SourceArgs,
}

pub fn compare(ctx: &Context<'_>, args: CompareArgs) -> Result<()> {
    let data = dataset::load(ctx, &args.sources)?;
    let requirement = data
        .requirement(&args.requirement_id)
        .ok_or_else(|| not_found(format!("requirement {}", args.requirement_id.trim())))?;

    let selected = select(&requirement.properties, &args.indexes)?;
    let rows = compare_properties(&selected, ctx.today);

    if ctx.json {
        return print_json(&rows);
    }

    if selected.is_empty() {
        println!("no matched properties for {}", requirement.id);
        return Ok(());
    }
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    for row in &rows {
        println!("{:<width$}  {}", row.label, row.values.join(" | "));
    }
    Ok(())
}

fn select(properties: &[PropertyRecord], indexes: &[usize]) -> Result<Vec<PropertyRecord>> {
    if indexes.is_empty() {
        return Ok(properties.to_vec());
    }
    indexes
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|position| properties.get(position))
                .cloned()
                .ok_or_else(|| {
                    invalid_input(format!(
                        "property index {index} out of range (1-{})",
                        properties.len()
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::select;
    use leadboard_core::PropertyRecord;

    fn property(id: &str) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            project_name: id.to_string(),
            area: None,
            configuration: None,
            base_price: None,
            size: None,
            builder: None,
            possession: None,
            facing: None,
            property_type: None,
            rera: None,
            configurations: Vec::new(),
        }
    }

    #[test]
    fn select_defaults_to_all() {
        let all = vec![property("a"), property("b")];
        assert_eq!(select(&all, &[]).expect("select").len(), 2);
    }

    #[test]
    fn select_uses_one_based_positions_in_given_order() {
        let all = vec![property("a"), property("b"), property("c")];
        let picked = select(&all, &[3, 1]).expect("select");
        let ids: Vec<&str> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn select_rejects_zero_and_out_of_range() {
        let all = vec![property("a")];
        assert!(select(&all, &[0]).is_err());
        assert!(select(&all, &[2]).is_err());
    }
}
