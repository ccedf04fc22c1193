//! Process command - summarize a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use gfs_core::{load_document, process_document};

use super::{load_config, load_reference};
use crate::report::{format_invoice, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or .txt with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Reference table CSV (overrides config)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let table = load_reference(&config, args.reference.as_ref())?;

    info!("Processing file: {}", args.input.display());
    let document = load_document(&args.input)?;
    let invoice = process_document(&document, &table, &config.aggregation.merge_rules);

    let output = format_invoice(&invoice, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    let unresolved: Vec<&str> = invoice.unresolved().map(|r| r.item_code.as_str()).collect();
    if !unresolved.is_empty() {
        eprintln!(
            "{} {} item code(s) missing from the reference table: {}",
            style("⚠").yellow(),
            unresolved.len(),
            unresolved.join(", ")
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
