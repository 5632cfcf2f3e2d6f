//! Show-config command - print the effective planner settings

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::settings::PlannerSettings;

#[derive(Args)]
pub struct ShowConfigArgs {
    /// Planner settings JSON file (defaults are shown without one)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: ShowConfigArgs) -> Result<()> {
    let settings = PlannerSettings::load_or_default(args.config.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
