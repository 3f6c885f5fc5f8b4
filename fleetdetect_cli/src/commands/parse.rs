use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fleetdetect_lib::Pipeline;

use crate::output::{print_json, print_record_markdown, print_record_table, OutputFormat};

#[derive(Args)]
pub struct ParseArgs {
    /// Saved HTML page
    pub file: PathBuf,

    /// Identifier to record (defaults to the file stem)
    #[arg(long)]
    pub identifier: Option<String>,
}

pub fn run(args: &ParseArgs, pipeline: &Pipeline, format: &OutputFormat) -> Result<()> {
    let markup = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let identifier = args
        .identifier
        .clone()
        .or_else(|| {
            args.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    let record = pipeline.run(&identifier, &markup)?;

    match format {
        OutputFormat::Table => print_record_table(&record),
        OutputFormat::Json => print_json(&record),
        OutputFormat::Markdown => print_record_markdown(&record),
    }

    Ok(())
}
