//! Item row detection and field extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::PRICE_TOKEN;
use super::{LineMatch, LineRule};

/// Shortest vendor item code.
pub const MIN_ITEM_CODE_LEN: usize = 6;

/// Longest vendor item code.
pub const MAX_ITEM_CODE_LEN: usize = 7;

/// Raw fields of a line that looks like an item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowCandidate {
    /// Leading 6-7 digit token.
    pub item_code: String,
    /// Second token, expected to hold the quantity.
    pub quantity_token: String,
    /// Every currency-shaped token on the line, in order.
    pub numeric_tokens: Vec<Decimal>,
}

impl ItemRowCandidate {
    /// Quantity from the second token, 1 when it is not a positive integer.
    pub fn quantity(&self) -> u32 {
        if !is_ascii_digits(&self.quantity_token) {
            return 1;
        }
        match self.quantity_token.parse() {
            Ok(0) | Err(_) => 1,
            Ok(quantity) => quantity,
        }
    }

    /// `(unit_price, line_total)` from the last two currency tokens.
    ///
    /// Earlier currency-shaped tokens are ignored. With fewer than two both
    /// prices are zero.
    pub fn prices(&self) -> (Decimal, Decimal) {
        match self.numeric_tokens.as_slice() {
            [.., unit_price, line_total] => (*unit_price, *line_total),
            _ => (Decimal::ZERO, Decimal::ZERO),
        }
    }
}

/// Recognises lines whose first token is a 6-7 digit item code.
///
/// This only checks the token's shape, so any line that happens to start with
/// a number of that length is taken as an item row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemRowRule;

impl ItemRowRule {
    pub fn new() -> Self {
        Self
    }
}

impl LineRule for ItemRowRule {
    fn name(&self) -> &'static str {
        "item_row"
    }

    fn apply(&self, _line: &str, tokens: &[&str]) -> Option<LineMatch> {
        let [code, quantity, ..] = tokens else {
            return None;
        };

        if !is_item_code(code) {
            return None;
        }

        Some(LineMatch::ItemRow(ItemRowCandidate {
            item_code: (*code).to_string(),
            quantity_token: (*quantity).to_string(),
            numeric_tokens: price_tokens(tokens),
        }))
    }
}

/// Whether `token` has the shape of a vendor item code.
pub fn is_item_code(token: &str) -> bool {
    is_ascii_digits(token) && (MIN_ITEM_CODE_LEN..=MAX_ITEM_CODE_LEN).contains(&token.len())
}

fn is_ascii_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn price_tokens(tokens: &[&str]) -> Vec<Decimal> {
    tokens
        .iter()
        .filter(|t| PRICE_TOKEN.is_match(t))
        .filter_map(|t| Decimal::from_str(t).ok())
        .collect()
}
