use crate::commands::print_json;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use leadboard_core::possession::classify_possession;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct PossessionArgs {
    /// Free-text possession date, e.g. RTM, 2027, 01/09/28, Dec 2027
    pub raw: String,
}

#[derive(Debug, Serialize)]
struct PossessionDto<'a> {
    input: &'a str,
    timeline: String,
    recognized: bool,
    today: String,
}

pub fn classify(args: PossessionArgs, today: NaiveDate, json: bool) -> Result<()> {
    let possession = classify_possession(&args.raw, today);
    if json {
        return print_json(&PossessionDto {
            input: &args.raw,
            timeline: possession.to_string(),
            recognized: possession.bucket().is_some(),
            today: today.format("%Y-%m-%d").to_string(),
        });
    }
    println!("{possession}");
    Ok(())
}
