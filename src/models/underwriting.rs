use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one underwriting run.
///
/// `score` is within `0..=100`, `confidence` within `60..=95`, and
/// `eligible_amount <= max_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingResult {
    pub score: i32,
    pub eligible_amount: Decimal,
    pub max_amount: Decimal,
    pub explanation: String,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: i32,
}

impl UnderwritingResult {
    pub fn is_eligible(&self) -> bool {
        self.eligible_amount > Decimal::ZERO
    }
}
