use rust_decimal::Decimal;

use crate::format::format_rupees;

/// Pick the explanation tier for `score`.
pub(super) fn explanation(score: i32, avg_credit: Decimal, credit_count: usize) -> String {
    let income = format_rupees(avg_credit);

    if score >= 75 {
        format!(
            "Great profile! We see regular income of {income} with good account management. \
             Your {credit_count} transactions show stable financial behavior."
        )
    } else if score >= 60 {
        format!(
            "Good financial profile with average income of {income}. \
             We found {credit_count} transactions indicating regular money flow."
        )
    } else if score >= 40 {
        format!(
            "Moderate risk profile. Average deposits of {income} with {credit_count} transactions. \
             Building more transaction history will help."
        )
    } else {
        format!(
            "Limited financial history available. We see average deposits of {income}. \
             More regular transactions will improve your profile."
        )
    }
}
