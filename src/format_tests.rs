#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── format_rupees ─────────────────────────────────────────────

#[test]
fn test_format_rupees_rounds_down() {
    assert_eq!(format_rupees(dec!(10766.67)), "₹10,766");
    assert_eq!(format_rupees(dec!(15750.9)), "₹15,750");
}

#[test]
fn test_format_rupees_small_and_zero() {
    assert_eq!(format_rupees(dec!(0)), "₹0");
    assert_eq!(format_rupees(dec!(999)), "₹999");
    assert_eq!(format_rupees(dec!(1000)), "₹1,000");
}

#[test]
fn test_format_rupees_large() {
    assert_eq!(format_rupees(dec!(1234567)), "₹1,234,567");
}

#[test]
fn test_format_rupees_negative() {
    assert_eq!(format_rupees(dec!(-2500.5)), "-₹2,501");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(18240.67)), "18,240.67");
    assert_eq!(format_amount(dec!(800)), "800.00");
    assert_eq!(format_amount(dec!(-42.5)), "-42.50");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("₹₹₹₹₹₹", 4), "₹₹₹…");
}
