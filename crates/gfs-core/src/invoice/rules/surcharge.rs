//! Surcharge row detection: container deposits and ecology fees.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::patterns::{CONTAINER_DEPOSIT, ECOLOGY_FEE, TOTAL_MARKER};
use super::{LineMatch, LineRule};

/// Kind of surcharge row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    /// Bottle/can deposit.
    ContainerDeposit,
    /// Environmental handling fee.
    EcologyFee,
}

impl SurchargeKind {
    /// Sentinel item code used for synthetic records.
    pub fn item_code(&self) -> &'static str {
        match self {
            SurchargeKind::ContainerDeposit => "N/A-CD",
            SurchargeKind::EcologyFee => "N/A-EF",
        }
    }

    /// GL description for synthetic records.
    pub fn description(&self) -> &'static str {
        match self {
            SurchargeKind::ContainerDeposit => "Container Deposit",
            SurchargeKind::EcologyFee => "Ecology Fee",
        }
    }

    /// Phrase that must appear on the line.
    pub fn phrase(&self) -> &'static str {
        match self {
            SurchargeKind::ContainerDeposit => "CONTAINER DEPOSIT",
            SurchargeKind::EcologyFee => "ECOLOGY FEE",
        }
    }
}

/// A recognised surcharge amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurchargeCandidate {
    pub kind: SurchargeKind,
    pub amount: Decimal,
}

/// Recognises one kind of surcharge line.
///
/// The line must contain the kind's phrase and must not contain `TOTAL`, which
/// marks the totals section repeating the phrase. The amount is the first
/// capture group of the kind's own pattern.
#[derive(Debug, Clone)]
pub struct SurchargeRule {
    kind: SurchargeKind,
    pattern: &'static Regex,
}

impl SurchargeRule {
    /// `CONTAINER DEPOSIT <amount>`
    pub fn container_deposit() -> Self {
        Self {
            kind: SurchargeKind::ContainerDeposit,
            pattern: &CONTAINER_DEPOSIT,
        }
    }

    /// `ECOLOGY FEE <rate> <amount>`; the rate is discarded.
    pub fn ecology_fee() -> Self {
        Self {
            kind: SurchargeKind::EcologyFee,
            pattern: &ECOLOGY_FEE,
        }
    }

    pub fn kind(&self) -> SurchargeKind {
        self.kind
    }
}

impl LineRule for SurchargeRule {
    fn name(&self) -> &'static str {
        match self.kind {
            SurchargeKind::ContainerDeposit => "container_deposit",
            SurchargeKind::EcologyFee => "ecology_fee",
        }
    }

    fn apply(&self, line: &str, _tokens: &[&str]) -> Option<LineMatch> {
        if !line.contains(self.kind.phrase()) || line.contains(TOTAL_MARKER) {
            return None;
        }

        let caps = self.pattern.captures(line)?;
        let amount = Decimal::from_str(&caps[1]).ok()?;

        Some(LineMatch::Surcharge(SurchargeCandidate {
            kind: self.kind,
            amount,
        }))
    }
}
