mod emi;
mod explain;

pub use emi::{calculate_emi, DEFAULT_ANNUAL_RATE};

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Occupation, Transaction, UnderwritingResult, UserProfile};

pub const RISK_LIMITED_HISTORY: &str = "Limited transaction history";
pub const RISK_LOW_MIN_BALANCE: &str = "Low minimum balance";
pub const RISK_NEGATIVE_CASH_FLOW: &str = "Negative cash flow pattern";
pub const RISK_INCOME_MISMATCH: &str = "Declared income not reflected in transactions";

pub const TIP_BALANCE: &str = "Maintain higher average balance to improve eligibility";
pub const TIP_HISTORY: &str = "More transaction history will help us assess better";
pub const TIP_REGULAR_INCOME: &str = "Regular income deposits can increase loan amount";

/// Smallest loan worth offering; anything below becomes zero.
pub const MIN_LOAN_AMOUNT: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);
/// Largest loan the flow will ever offer.
pub const MAX_LOAN_AMOUNT: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

const BASE_SCORE: i32 = 50;

/// Stateless underwriting service. Carries only the interest rate used for
/// EMI quotes, so it can be copied into whatever needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underwriter {
    annual_rate: Decimal,
}

impl Default for Underwriter {
    fn default() -> Self {
        Self::new(DEFAULT_ANNUAL_RATE)
    }
}

impl Underwriter {
    pub fn new(annual_rate: Decimal) -> Self {
        Self { annual_rate }
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn underwrite(
        &self,
        profile: &UserProfile,
        transactions: &[Transaction],
    ) -> UnderwritingResult {
        calculate_underwriting(profile, transactions)
    }

    pub fn emi(&self, principal: Decimal, tenure_months: u32) -> i64 {
        calculate_emi(principal, tenure_months, self.annual_rate)
    }
}

/// Score `profile` against its parsed transactions and size a loan offer.
pub fn calculate_underwriting(
    profile: &UserProfile,
    transactions: &[Transaction],
) -> UnderwritingResult {
    let credits: Vec<Decimal> = transactions
        .iter()
        .filter(|t| t.is_credit())
        .map(|t| t.amount)
        .collect();
    let debits: Vec<Decimal> = transactions
        .iter()
        .filter(|t| t.is_debit())
        .map(|t| t.amount)
        .collect();
    let balances: Vec<Decimal> = transactions
        .iter()
        .filter_map(|t| t.balance_after)
        .collect();

    let avg_credit = average(&credits);
    let avg_debit = average(&debits);

    let mut score = BASE_SCORE;
    let mut risk_factors = Vec::new();

    // Income stability
    if credits.len() >= 3 {
        score += 15;
        if avg_credit > Decimal::from(10_000) {
            score += 10;
        }
        if avg_credit > Decimal::from(20_000) {
            score += 5;
        }
    } else {
        score -= 10;
        risk_factors.push(RISK_LIMITED_HISTORY.to_string());
    }

    // Balance management
    if let Some(min_balance) = balances.iter().min().copied() {
        if average(&balances) > Decimal::from(5_000) {
            score += 10;
        }
        if min_balance > Decimal::from(1_000) {
            score += 5;
        } else {
            score -= 5;
            risk_factors.push(RISK_LOW_MIN_BALANCE.to_string());
        }
    }

    // Cash flow: credit/debit ratio against 1.2 and 0.8, cross-multiplied.
    if avg_credit > Decimal::ZERO && avg_debit > Decimal::ZERO {
        if avg_credit > avg_debit.saturating_mul(Decimal::new(12, 1)) {
            score += 10;
        } else if avg_credit < avg_debit * Decimal::new(8, 1) {
            score -= 15;
            risk_factors.push(RISK_NEGATIVE_CASH_FLOW.to_string());
        }
    }

    score += occupation_score(profile.occupation);

    // Declared vs observed income: observed/declared against (0.8, 1.5) and 0.5.
    if let Some(declared) = profile.declared_income() {
        if avg_credit > Decimal::ZERO {
            if avg_credit > declared * Decimal::new(8, 1)
                && avg_credit < declared.saturating_mul(Decimal::new(15, 1))
            {
                score += 5;
            } else if avg_credit < declared * Decimal::new(5, 1) {
                score -= 10;
                risk_factors.push(RISK_INCOME_MISMATCH.to_string());
            }
        }
    }

    let score = score.clamp(0, 100);

    let estimated_income = avg_credit.max(profile.declared_income().unwrap_or(Decimal::ZERO));
    let raw_eligible = estimated_income
        .saturating_mul(loan_multiplier(score))
        .floor();
    let eligible_amount = apply_loan_band(raw_eligible);
    // An average carries the full 28-digit scale; keep the cap in paise.
    let max_amount = MAX_LOAN_AMOUNT
        .min(estimated_income.saturating_mul(Decimal::from(3)))
        .round_dp(2);

    let mut recommendations = Vec::new();
    if score < 60 {
        recommendations.push(TIP_BALANCE.to_string());
    }
    if credits.len() < 5 {
        recommendations.push(TIP_HISTORY.to_string());
    }
    if avg_credit < Decimal::from(15_000) {
        recommendations.push(TIP_REGULAR_INCOME.to_string());
    }

    let explanation = explain::explanation(score, avg_credit, credits.len());
    let confidence = confidence(credits.len());

    debug!(
        score,
        credits = credits.len(),
        debits = debits.len(),
        %avg_credit,
        %eligible_amount,
        %max_amount,
        "underwriting complete"
    );

    UnderwritingResult {
        score,
        eligible_amount,
        max_amount,
        explanation,
        risk_factors,
        recommendations,
        confidence,
    }
}

pub fn occupation_score(occupation: Occupation) -> i32 {
    match occupation {
        Occupation::Farmer => 5,
        Occupation::Teacher => 15,
        Occupation::Shopkeeper => 10,
        Occupation::Driver => 8,
        Occupation::Worker => 3,
        Occupation::Other => 5,
    }
}

/// Income multiple offered at a given score.
pub fn loan_multiplier(score: i32) -> Decimal {
    match score {
        s if s >= 80 => Decimal::new(20, 1),
        s if s >= 70 => Decimal::new(15, 1),
        s if s >= 60 => Decimal::new(10, 1),
        s if s >= 50 => Decimal::new(7, 1),
        _ => Decimal::new(3, 1),
    }
}

/// Zero out offers below the minimum and cap those above the maximum.
pub fn apply_loan_band(amount: Decimal) -> Decimal {
    if amount < MIN_LOAN_AMOUNT {
        Decimal::ZERO
    } else if amount > MAX_LOAN_AMOUNT {
        MAX_LOAN_AMOUNT
    } else {
        amount
    }
}

fn confidence(credit_count: usize) -> i32 {
    let raw = i32::try_from(credit_count).unwrap_or(i32::MAX).saturating_mul(15);
    raw.clamp(60, 95)
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum = values
        .iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));
    sum / Decimal::from(values.len())
}
