//! Aggregated invoice summary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::LineItemRecord;
use crate::invoice::aggregator::sum_amounts;

/// Totals per GL description after merge rules, plus tax and grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Summed line totals keyed by GL description.
    pub categories: BTreeMap<String, Decimal>,

    /// GST/HST total taken from the last page.
    pub tax: Decimal,

    /// Sum of all category totals plus tax.
    pub grand_total: Decimal,
}

impl Summary {
    /// Sum of the category totals, excluding tax.
    pub fn subtotal(&self) -> Decimal {
        sum_amounts(self.categories.values().copied())
    }
}

/// Everything a single invoice run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedInvoice {
    /// Records in document order.
    pub records: Vec<LineItemRecord>,

    /// Summary built from the records.
    pub summary: Summary,
}

impl ProcessedInvoice {
    /// Records whose item code could not be resolved.
    pub fn unresolved(&self) -> impl Iterator<Item = &LineItemRecord> {
        self.records.iter().filter(|r| r.is_unresolved())
    }
}
