use anyhow::Result;
use rust_decimal::Decimal;

use crate::format::format_rupees;
use crate::models::{LoanTerms, UnderwritingResult};
use crate::underwriting::calculate_emi;

/// Repayment periods the applicant can choose from, in months.
pub const TENURE_OPTIONS: &[u32] = &[3, 6, 9, 12];
pub const DEFAULT_TENURE: u32 = 6;

/// Loan amounts are offered in steps of this size.
pub const AMOUNT_STEP: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);

/// Every selectable amount: multiples of the step up to `max_amount`, keeping
/// only those within the eligible amount. Empty when not eligible.
pub fn amount_options(result: &UnderwritingResult) -> Vec<Decimal> {
    let mut options = Vec::new();
    let mut amount = AMOUNT_STEP;
    while amount <= result.max_amount && amount <= result.eligible_amount {
        options.push(amount);
        amount += AMOUNT_STEP;
    }
    options
}

impl LoanTerms {
    pub fn new(amount: Decimal, tenure_months: u32, annual_rate: Decimal) -> Self {
        let emi = calculate_emi(amount, tenure_months, annual_rate);
        let total_amount = Decimal::from(emi).saturating_mul(Decimal::from(tenure_months));
        Self {
            amount,
            tenure_months,
            emi,
            annual_rate,
            total_amount,
            total_interest: total_amount - amount,
        }
    }
}

/// Validate the applicant's choice against the offer and price it.
///
/// The eligible amount itself is always accepted, even when it is not a
/// multiple of [`AMOUNT_STEP`].
pub fn select_offer(
    result: &UnderwritingResult,
    amount: Decimal,
    tenure_months: u32,
    annual_rate: Decimal,
) -> Result<LoanTerms> {
    if !result.is_eligible() {
        anyhow::bail!("Not eligible for a loan at this time");
    }
    if amount != result.eligible_amount && !amount_options(result).contains(&amount) {
        anyhow::bail!(
            "Amount {} is not on offer (choose a multiple of {} up to {})",
            format_rupees(amount),
            format_rupees(AMOUNT_STEP),
            format_rupees(result.eligible_amount)
        );
    }
    if !TENURE_OPTIONS.contains(&tenure_months) {
        let choices: Vec<String> = TENURE_OPTIONS.iter().map(|t| t.to_string()).collect();
        anyhow::bail!(
            "Tenure of {tenure_months} months is not available (choose {})",
            choices.join(", ")
        );
    }
    Ok(LoanTerms::new(amount, tenure_months, annual_rate))
}
