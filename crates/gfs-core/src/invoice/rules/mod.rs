//! Rule-based line matchers for vendor invoice text.
//!
//! Each rule looks at one trimmed line and its whitespace tokens and either
//! recognises it or stays silent. Rules are independent: a single line may be
//! claimed by more than one of them.

pub mod item_row;
pub mod patterns;
pub mod surcharge;
pub mod tax;

pub use item_row::{ItemRowCandidate, ItemRowRule};
pub use surcharge::{SurchargeCandidate, SurchargeKind, SurchargeRule};
pub use tax::extract_tax;

/// What a rule recognised on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// A catalog item row starting with a vendor item code.
    ItemRow(ItemRowCandidate),
    /// A surcharge row such as a container deposit or ecology fee.
    Surcharge(SurchargeCandidate),
}

/// Trait for line rules.
pub trait LineRule {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Try to recognise `line`; `tokens` is `line` split on whitespace.
    fn apply(&self, line: &str, tokens: &[&str]) -> Option<LineMatch>;
}
