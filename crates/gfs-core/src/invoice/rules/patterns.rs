//! Regex patterns shared by the line rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A whole token shaped like a currency amount: 12.34
    pub static ref PRICE_TOKEN: Regex = Regex::new(
        r"^\d+\.\d{2}$"
    ).unwrap();

    // Single amount after the phrase
    pub static ref CONTAINER_DEPOSIT: Regex = Regex::new(
        r"CONTAINER DEPOSIT\s+(\d+\.\d{2})"
    ).unwrap();

    // Rate then fee; only the fee is captured
    pub static ref ECOLOGY_FEE: Regex = Regex::new(
        r"ECOLOGY FEE\s+\d+\.\d{2}\s+(\d+\.\d{2})"
    ).unwrap();

    // Tax total on the last page, optional dollar sign
    pub static ref GST_HST: Regex = Regex::new(
        r"GST/HST\s+\$?(\d+\.\d{2})"
    ).unwrap();
}

/// Marker that turns a surcharge line into a totals-section line.
pub const TOTAL_MARKER: &str = "TOTAL";
