//! GST/HST total extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::GST_HST;

/// Find the GST/HST total in the last page's text.
///
/// Anything that goes wrong here yields zero; a missing tax line never fails
/// the run.
pub fn extract_tax(last_page: Option<&str>) -> Decimal {
    let Some(text) = last_page else {
        debug!("No last page available, tax defaults to 0.00");
        return Decimal::ZERO;
    };

    match GST_HST
        .captures(text)
        .and_then(|caps| Decimal::from_str(&caps[1]).ok())
    {
        Some(tax) => {
            debug!("Found GST/HST total {}", tax);
            tax
        }
        None => {
            debug!("No GST/HST total on last page, tax defaults to 0.00");
            Decimal::ZERO
        }
    }
}
