use rust_decimal::Decimal;

/// Group the integer digits of `digits` in threes: `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Whole rupees, rounded down, with thousand separators.
/// e.g. `15750.9` → `"₹15,750"`
pub fn format_rupees(val: Decimal) -> String {
    let whole = val.floor();
    let digits = whole.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if whole < Decimal::ZERO {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Two decimal places with thousand separators, no currency sign.
/// e.g. `18240.67` → `"18,240.67"`
pub fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");
    let with_commas = group_thousands(int_part);

    if val < Decimal::ZERO {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
