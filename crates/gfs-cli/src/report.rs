//! Report formatting for processed invoices.

use gfs_core::ProcessedInvoice;

/// Output format for reports.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Item table with GL summary
    Text,
    /// JSON output
    Json,
    /// CSV of line items
    Csv,
}

pub fn format_invoice(invoice: &ProcessedInvoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(invoice)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(invoice)?),
        OutputFormat::Csv => format_csv(invoice),
    }
}

fn format_text(invoice: &ProcessedInvoice) -> String {
    let mut output = String::new();

    output.push_str("Item Code  Quantity  Unit Price  Line Total  GL Code  GL Description\n");
    output.push_str(&"-".repeat(80));
    output.push('\n');
    for item in &invoice.records {
        output.push_str(&format!(
            "{:>8} {:>10} {:>11.2} {:>11.2} {:>8} {}\n",
            item.item_code,
            item.quantity,
            item.unit_price,
            item.line_total,
            item.gl_code,
            item.gl_description
        ));
    }

    output.push_str("\nSummary by GL Description:\n");
    for (description, total) in &invoice.summary.categories {
        output.push_str(&format!("{:30} ${:.2}\n", description, total));
    }

    output.push_str(&format!("\nGST/HST: ${:.2}\n", invoice.summary.tax));
    output.push_str(&format!("\nGrand Total: ${:.2}\n", invoice.summary.grand_total));

    output
}

fn format_csv(invoice: &ProcessedInvoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "item_code",
        "quantity",
        "unit_price",
        "line_total",
        "gl_code",
        "gl_description",
    ])?;

    for item in &invoice.records {
        wtr.write_record([
            item.item_code.as_str(),
            &item.quantity.to_string(),
            &format!("{:.2}", item.unit_price),
            &format!("{:.2}", item.line_total),
            &item.gl_code,
            &item.gl_description,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
