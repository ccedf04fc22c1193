//! Summary aggregation: group by GL description, fold surcharge categories,
//! add tax.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::record::LineItemRecord;
use crate::models::summary::Summary;

use super::rules::SurchargeKind;

/// Category that absorbs container deposits and ecology fees.
pub const PRIMARY_BEVERAGE_CATEGORY: &str = "N/A BEV";

/// Folds the total of one GL description into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    /// Category removed from the final summary.
    pub source: String,
    /// Category that receives the source total.
    pub target: String,
}

impl MergeRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Container deposit and ecology fee both go to the beverage bucket.
    pub fn defaults() -> Vec<Self> {
        [SurchargeKind::ContainerDeposit, SurchargeKind::EcologyFee]
            .iter()
            .map(|kind| Self::new(kind.description(), PRIMARY_BEVERAGE_CATEGORY))
            .collect()
    }
}

/// Builds the invoice summary from line item records.
#[derive(Debug, Clone)]
pub struct Aggregator {
    merge_rules: Vec<MergeRule>,
}

impl Aggregator {
    pub fn new(merge_rules: Vec<MergeRule>) -> Self {
        Self { merge_rules }
    }

    /// Sum line totals per GL description.
    pub fn raw_totals(records: &[LineItemRecord]) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for record in records {
            let total = totals
                .entry(record.gl_description.clone())
                .or_insert(Decimal::ZERO);
            *total = add_amount(*total, record.line_total);
        }
        totals
    }

    /// Apply the merge rules to raw totals.
    ///
    /// A source category disappears and its total is added to its target,
    /// which is created if it had no rows of its own. The overall sum is
    /// unchanged.
    pub fn merge(&self, raw: &BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
        let mut merged = BTreeMap::new();

        for (description, total) in raw {
            let bucket = match self.target_for(description) {
                Some(target) => {
                    debug!("Folding {} ({}) into {}", description, total, target);
                    target
                }
                None => description.as_str(),
            };
            let merged_total = merged.entry(bucket.to_string()).or_insert(Decimal::ZERO);
            *merged_total = add_amount(*merged_total, *total);
        }

        merged
    }

    /// Group, merge and total the records.
    pub fn summarize(&self, records: &[LineItemRecord], tax: Decimal) -> Summary {
        let raw = Self::raw_totals(records);
        let categories = self.merge(&raw);
        let subtotal = sum_amounts(categories.values().copied());
        let grand_total = add_amount(subtotal, tax);

        info!(
            "Summary: {} categories, subtotal {}, tax {}, grand total {}",
            categories.len(),
            subtotal,
            tax,
            grand_total
        );

        Summary {
            categories,
            tax,
            grand_total,
        }
    }

    fn target_for(&self, description: &str) -> Option<&str> {
        self.merge_rules
            .iter()
            .find(|rule| rule.source == description)
            .map(|rule| rule.target.as_str())
    }
}

/// Add two amounts, saturating at `Decimal::MAX` instead of panicking.
pub fn add_amount(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Amount overflow adding {} to {}, capping at {}", amount, total, Decimal::MAX);
        Decimal::MAX
    })
}

/// Saturating sum of amounts.
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, add_amount)
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MergeRule::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::GlAccount;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(description: &str, total: &str) -> LineItemRecord {
        LineItemRecord::item("123456", 1, dec(total), dec(total), GlAccount::new("1", description))
    }

    fn totals(pairs: &[(&str, &str)]) -> BTreeMap<String, Decimal> {
        pairs.iter().map(|(k, v)| (k.to_string(), dec(v))).collect()
    }

    #[test]
    fn test_raw_grouping() {
        let records = vec![
            record("Food", "20.00"),
            record("Paper", "5.25"),
            record("Food", "1.10"),
        ];
        assert_eq!(
            Aggregator::raw_totals(&records),
            totals(&[("Food", "21.10"), ("Paper", "5.25")])
        );
    }

    #[test]
    fn test_surcharges_fold_into_beverage_bucket() {
        let records = vec![
            record("N/A BEV", "36.00"),
            record("Container Deposit", "0.10"),
            record("Ecology Fee", "0.05"),
            record("Food", "20.00"),
        ];

        let summary = Aggregator::default().summarize(&records, Decimal::ZERO);
        assert_eq!(
            summary.categories,
            totals(&[("N/A BEV", "36.15"), ("Food", "20.00")])
        );
    }

    #[test]
    fn test_fee_only_invoice_creates_beverage_bucket() {
        let records = vec![record("Container Deposit", "0.10")];

        let summary = Aggregator::default().summarize(&records, Decimal::ZERO);
        assert_eq!(summary.categories, totals(&[("N/A BEV", "0.10")]));
    }

    #[test]
    fn test_merge_preserves_total() {
        let raw = totals(&[
            ("Container Deposit", "1.20"),
            ("Ecology Fee", "0.35"),
            ("Food", "99.99"),
            ("ASK BOSS FOR PROPER GL", "7.01"),
        ]);
        let merged = Aggregator::default().merge(&raw);

        let before: Decimal = raw.values().copied().sum();
        let after: Decimal = merged.values().copied().sum();
        assert_eq!(before, after);
        assert!(!merged.contains_key("Container Deposit"));
        assert!(!merged.contains_key("Ecology Fee"));
    }

    #[test]
    fn test_custom_merge_rules() {
        let aggregator = Aggregator::new(vec![MergeRule::new("Fuel Surcharge", "Freight")]);
        let raw = totals(&[("Fuel Surcharge", "4.00"), ("Freight", "10.00"), ("Ecology Fee", "0.05")]);

        assert_eq!(
            aggregator.merge(&raw),
            totals(&[("Freight", "14.00"), ("Ecology Fee", "0.05")])
        );
    }

    #[test]
    fn test_grand_total_adds_tax() {
        let records = vec![record("Food", "20.00"), record("N/A BEV", "3.00")];
        let summary = Aggregator::default().summarize(&records, dec("3.45"));

        assert_eq!(summary.tax, dec("3.45"));
        assert_eq!(summary.grand_total, summary.subtotal() + summary.tax);
        assert_eq!(summary.grand_total, dec("26.45"));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = "40000000000000000000000000000.00";
        let records = vec![record("Food", huge), record("Food", huge)];

        let summary = Aggregator::default().summarize(&records, dec("3.45"));
        assert_eq!(summary.categories.get("Food"), Some(&Decimal::MAX));
        assert_eq!(summary.grand_total, Decimal::MAX);
        assert_eq!(summary.subtotal(), Decimal::MAX);
    }

    #[test]
    fn test_empty_records() {
        let summary = Aggregator::default().summarize(&[], Decimal::ZERO);
        assert!(summary.categories.is_empty());
        assert_eq!(summary.grand_total, Decimal::ZERO);
    }
}
