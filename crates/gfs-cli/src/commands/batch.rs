//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{error, warn};

use gfs_core::{load_document, process_document, GfsConfig, ProcessedInvoice, ReferenceTable};

use super::{load_config, load_reference};
use crate::report::{format_invoice, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Reference table CSV (overrides config)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Output directory for per-file reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    invoice: Option<ProcessedInvoice>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let table = load_reference(&config, args.reference.as_ref())?;

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single_file(&path, &table, &config, &args) {
            Ok(invoice) => results.push(ProcessResult {
                path,
                invoice: Some(invoice),
                error: None,
            }),
            Err(e) => {
                if !args.continue_on_error {
                    pb.abandon();
                    return Err(e.context(format!("Failed to process {}", path.display())));
                }
                error!("Failed to process {}: {}", path.display(), e);
                results.push(ProcessResult {
                    path,
                    invoice: None,
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    print_summary(&results);

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!(
        "{} Processed {} files ({} failed) in {:.1}s",
        style("✓").green(),
        results.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn process_single_file(
    path: &Path,
    table: &ReferenceTable,
    config: &GfsConfig,
    args: &BatchArgs,
) -> anyhow::Result<ProcessedInvoice> {
    let document = load_document(path)?;
    if document.is_empty() {
        warn!("No text found in {}", path.display());
    }

    let invoice = process_document(&document, table, &config.aggregation.merge_rules);

    if let Some(ref output_dir) = args.output_dir {
        fs::write(
            report_path(output_dir, path, args.format),
            format_invoice(&invoice, args.format)?,
        )?;
    }

    Ok(invoice)
}

/// `<stem>.report.<ext>` inside `output_dir`, never the input's own name.
fn report_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("invoice");
    let ext = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    output_dir.join(format!("{}.report.{}", stem, ext))
}

fn print_summary(results: &[ProcessResult]) {
    println!();
    println!("{:40} {:>8} {:>10} {:>12}", "File", "Records", "GST/HST", "Grand Total");
    println!("{}", "-".repeat(73));

    let mut total = Decimal::ZERO;
    for result in results {
        let name = result.path.display().to_string();
        match (&result.invoice, &result.error) {
            (Some(invoice), _) => {
                total += invoice.summary.grand_total;
                println!(
                    "{:40} {:>8} {:>10.2} {:>12.2}",
                    name,
                    invoice.records.len(),
                    invoice.summary.tax,
                    invoice.summary.grand_total
                );
            }
            (None, Some(err)) => {
                println!("{:40} {}", name, style(format!("error: {}", err)).red());
            }
            (None, None) => {}
        }
    }

    println!("{}", "-".repeat(73));
    println!("{:40} {:>8} {:>10} {:>12.2}", "Total", "", "", total);
    println!();
}
