use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Annual interest rate, in percent, used when the caller does not pick one.
pub const DEFAULT_ANNUAL_RATE: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Equated monthly instalment, rounded up to a whole rupee.
///
/// `EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual_rate / 12 / 100`.
/// Degenerate inputs do not panic: a non-positive principal costs nothing, a
/// zero tenure repays everything at once, and a non-positive rate is treated
/// as interest-free.
pub fn calculate_emi(principal: Decimal, tenure_months: u32, annual_rate_percent: Decimal) -> i64 {
    if principal <= Decimal::ZERO {
        return 0;
    }
    if tenure_months == 0 {
        return to_whole(principal.ceil());
    }

    let months = Decimal::from(tenure_months);
    let monthly_rate = annual_rate_percent / Decimal::from(12) / Decimal::ONE_HUNDRED;
    if monthly_rate <= Decimal::ZERO {
        return to_whole((principal / months).ceil());
    }

    let emi = match compound(Decimal::ONE + monthly_rate, tenure_months) {
        // (1 + r)^n overflowed; the annuity factor has converged to 1.
        None => principal.saturating_mul(monthly_rate),
        Some(growth) => match growth.checked_div(growth - Decimal::ONE) {
            Some(factor) => principal.saturating_mul(monthly_rate).saturating_mul(factor),
            None => principal / months,
        },
    };
    to_whole(emi.ceil())
}

/// `base^exp` by repeated squaring, `None` on overflow.
fn compound(base: Decimal, mut exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

fn to_whole(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(i64::MAX)
}
