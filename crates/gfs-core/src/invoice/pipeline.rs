//! Extraction pipeline: document text to line item records and tax.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::record::{GlAccount, LineItemRecord, SURCHARGE_GL_CODE};
use crate::pdf::DocumentText;

use super::classifier::LineClassifier;
use super::resolver::ItemResolver;
use super::rules::{extract_tax, LineMatch};

/// Records and tax pulled from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records in document order.
    pub records: Vec<LineItemRecord>,
    /// GST/HST total, zero when absent.
    pub tax: Decimal,
}

/// Drives the classifier and resolver over every line of a document.
pub struct ExtractionPipeline<'a> {
    classifier: LineClassifier,
    resolver: ItemResolver<'a>,
}

impl<'a> ExtractionPipeline<'a> {
    /// Create a pipeline with the default line rules.
    pub fn new(resolver: ItemResolver<'a>) -> Self {
        Self::with_classifier(LineClassifier::new(), resolver)
    }

    pub fn with_classifier(classifier: LineClassifier, resolver: ItemResolver<'a>) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    /// Extract records from the full text and tax from the last page.
    pub fn run(&self, document: &DocumentText) -> Extraction {
        info!(
            "Extracting line items from {} characters over {} pages",
            document.text.len(),
            document.pages.len()
        );

        let records = self.extract_records(&document.text);
        let tax = extract_tax(document.last_page());

        debug!("Extracted {} records, tax {}", records.len(), tax);

        Extraction { records, tax }
    }

    /// Classify every line in order and build a record for each match.
    pub fn extract_records(&self, text: &str) -> Vec<LineItemRecord> {
        let mut records = Vec::new();

        for line in text.lines() {
            for found in self.classifier.classify(line) {
                records.push(self.to_record(found));
            }
        }

        records
    }

    fn to_record(&self, found: LineMatch) -> LineItemRecord {
        match found {
            LineMatch::ItemRow(candidate) => {
                let account = self.resolver.resolve(&candidate.item_code);
                let quantity = candidate.quantity();
                let (unit_price, line_total) = candidate.prices();
                LineItemRecord::item(candidate.item_code, quantity, unit_price, line_total, account)
            }
            LineMatch::Surcharge(surcharge) => LineItemRecord::surcharge(
                surcharge.kind.item_code(),
                surcharge.amount,
                GlAccount::new(SURCHARGE_GL_CODE, surcharge.kind.description()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTable;
    use pretty_assertions::assert_eq;

    fn table() -> ReferenceTable {
        ReferenceTable::from_entries([
            ("123456", GlAccount::new("500100", "Food")),
            ("7654321", GlAccount::new("500200", "N/A BEV")),
        ])
    }

    #[test]
    fn test_single_item_row() {
        let table = table();
        let pipeline = ExtractionPipeline::new(ItemResolver::new(&table));

        let extraction = pipeline.run(&DocumentText::from_pages(["123456 2 10.00 20.00\n"]));

        assert_eq!(
            extraction.records,
            vec![LineItemRecord {
                item_code: "123456".to_string(),
                quantity: 2,
                unit_price: Decimal::new(1000, 2),
                line_total: Decimal::new(2000, 2),
                gl_code: "500100".to_string(),
                gl_description: "Food".to_string(),
            }]
        );
        assert_eq!(extraction.tax, Decimal::ZERO);
    }

    #[test]
    fn test_document_order_and_surcharges() {
        let table = table();
        let pipeline = ExtractionPipeline::new(ItemResolver::new(&table));
        let text = "\
            GORDON FOOD SERVICE\n\
            7654321 3 COLA 24X355ML 12.00 36.00\n\
            CONTAINER DEPOSIT 0.10\n\
            999999 CS MYSTERY 5.00 5.00\n\
            ECOLOGY FEE 1.00 0.05\n\
            CONTAINER DEPOSIT TOTAL 0.10\n";

        let records = pipeline.extract_records(text);
        let codes: Vec<&str> = records.iter().map(|r| r.item_code.as_str()).collect();
        assert_eq!(codes, vec!["7654321", "N/A-CD", "999999", "N/A-EF"]);

        assert_eq!(records[1].gl_code, "600265");
        assert_eq!(records[1].gl_description, "Container Deposit");
        assert_eq!(records[1].line_total, Decimal::new(10, 2));

        assert_eq!(records[2].quantity, 1);
        assert_eq!(records[2].gl_code, "ASK BOSS");
        assert_eq!(records[2].gl_description, "ASK BOSS FOR PROPER GL");

        assert_eq!(records[3].unit_price, Decimal::new(5, 2));
        assert_eq!(records[3].line_total, Decimal::new(5, 2));
    }

    #[test]
    fn test_line_matching_item_and_surcharge_yields_both() {
        let table = table();
        let pipeline = ExtractionPipeline::new(ItemResolver::new(&table));

        let records = pipeline.extract_records("7654321 1 CONTAINER DEPOSIT 0.10 0.10");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item_code, "7654321");
        assert_eq!(records[1].item_code, "N/A-CD");
    }

    #[test]
    fn test_tax_only_from_last_page() {
        let table = table();
        let pipeline = ExtractionPipeline::new(ItemResolver::new(&table));

        let document = DocumentText::from_pages(["GST/HST $9.99\n", "... GST/HST $3.45 ..."]);
        assert_eq!(pipeline.run(&document).tax, Decimal::new(345, 2));

        let document = DocumentText::from_pages(["GST/HST $9.99\n", "THANK YOU"]);
        assert_eq!(pipeline.run(&document).tax, Decimal::ZERO);
    }

    #[test]
    fn test_empty_document() {
        let table = table();
        let pipeline = ExtractionPipeline::new(ItemResolver::new(&table));

        let extraction = pipeline.run(&DocumentText::default());
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.tax, Decimal::ZERO);
    }
}
