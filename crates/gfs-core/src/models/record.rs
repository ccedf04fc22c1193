//! Line item records produced by the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GL code assigned to item codes missing from the reference table.
pub const UNRESOLVED_GL_CODE: &str = "ASK BOSS";

/// GL description assigned to item codes missing from the reference table.
pub const UNRESOLVED_GL_DESCRIPTION: &str = "ASK BOSS FOR PROPER GL";

/// GL code shared by every surcharge row.
pub const SURCHARGE_GL_CODE: &str = "600265";

/// A general-ledger account: code plus human-readable category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    /// GL account identifier.
    pub code: String,

    /// GL category name used for summary grouping.
    pub description: String,
}

impl GlAccount {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// The sentinel account for item codes nobody has mapped yet.
    pub fn unresolved() -> Self {
        Self::new(UNRESOLVED_GL_CODE, UNRESOLVED_GL_DESCRIPTION)
    }

    /// Whether this is the unresolved sentinel.
    pub fn is_unresolved(&self) -> bool {
        self.code == UNRESOLVED_GL_CODE && self.description == UNRESOLVED_GL_DESCRIPTION
    }
}

/// One parsed invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// Vendor item code, or a surcharge sentinel such as `N/A-CD`.
    pub item_code: String,

    /// Ordered quantity. Always 1 for surcharge rows.
    pub quantity: u32,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Extended amount for the line.
    pub line_total: Decimal,

    /// Resolved GL code.
    pub gl_code: String,

    /// Resolved GL description.
    pub gl_description: String,
}

impl LineItemRecord {
    /// Build a record from an item row and its resolved account.
    pub fn item(
        item_code: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        line_total: Decimal,
        account: GlAccount,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
            unit_price,
            line_total,
            gl_code: account.code,
            gl_description: account.description,
        }
    }

    /// Build a synthetic surcharge record where the amount is both price and total.
    pub fn surcharge(item_code: impl Into<String>, amount: Decimal, account: GlAccount) -> Self {
        Self::item(item_code, 1, amount, amount, account)
    }

    /// Whether the item code was missing from the reference table.
    pub fn is_unresolved(&self) -> bool {
        self.gl_code == UNRESOLVED_GL_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surcharge_record_uses_amount_twice() {
        let amount = Decimal::new(10, 2);
        let record = LineItemRecord::surcharge(
            "N/A-CD",
            amount,
            GlAccount::new(SURCHARGE_GL_CODE, "Container Deposit"),
        );

        assert_eq!(record.quantity, 1);
        assert_eq!(record.unit_price, amount);
        assert_eq!(record.line_total, amount);
        assert_eq!(record.gl_code, "600265");
        assert!(!record.is_unresolved());
    }

    #[test]
    fn test_unresolved_account() {
        let account = GlAccount::unresolved();
        assert!(account.is_unresolved());
        assert_eq!(account.code, "ASK BOSS");
        assert_eq!(account.description, "ASK BOSS FOR PROPER GL");
        assert!(!GlAccount::new("500100", "Food").is_unresolved());
    }
}
