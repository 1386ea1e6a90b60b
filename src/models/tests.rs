#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_profile(income: Option<Decimal>) -> UserProfile {
    UserProfile::new(
        "Sunita Devi".into(),
        "26-35".into(),
        Occupation::Shopkeeper,
        "Nashik".into(),
        income,
    )
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_kind_helpers() {
    let txn = Transaction {
        kind: TransactionKind::Credit,
        amount: dec!(500),
        description: "Credited INR 500".into(),
        occurred_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        balance_after: None,
    };
    assert!(txn.is_credit());
    assert!(!txn.is_debit());

    let txn = Transaction {
        kind: TransactionKind::Debit,
        ..txn
    };
    assert!(txn.is_debit());
    assert!(!txn.is_credit());
}

#[test]
fn test_transaction_kind_display() {
    assert_eq!(format!("{}", TransactionKind::Credit), "credit");
    assert_eq!(format!("{}", TransactionKind::Debit), "debit");
}

// ── Occupation ────────────────────────────────────────────────

#[test]
fn test_occupation_parse() {
    assert_eq!(Occupation::parse("farmer"), Occupation::Farmer);
    assert_eq!(Occupation::parse("TEACHER"), Occupation::Teacher);
    assert_eq!(Occupation::parse(" shopkeeper "), Occupation::Shopkeeper);
    assert_eq!(Occupation::parse("driver"), Occupation::Driver);
    assert_eq!(Occupation::parse("worker"), Occupation::Worker);
    assert_eq!(Occupation::parse("other"), Occupation::Other);
}

#[test]
fn test_occupation_parse_unknown_is_other() {
    assert_eq!(Occupation::parse("astronaut"), Occupation::Other);
    assert_eq!(Occupation::parse(""), Occupation::Other);
}

#[test]
fn test_occupation_roundtrip() {
    for o in Occupation::all() {
        assert_eq!(Occupation::parse(o.as_str()), *o, "Roundtrip failed for {o}");
    }
}

#[test]
fn test_occupation_serde_as_plain_string() {
    let json = serde_json::to_string(&Occupation::Driver).unwrap();
    assert_eq!(json, "\"driver\"");
    let back: Occupation = serde_json::from_str("\"fisherman\"").unwrap();
    assert_eq!(back, Occupation::Other);
}

// ── UserProfile ───────────────────────────────────────────────

#[test]
fn test_declared_income_ignores_zero() {
    assert_eq!(make_profile(None).declared_income(), None);
    assert_eq!(make_profile(Some(Decimal::ZERO)).declared_income(), None);
    assert_eq!(
        make_profile(Some(dec!(12000))).declared_income(),
        Some(dec!(12000))
    );
}

#[test]
fn test_validate_ok() {
    assert!(make_profile(Some(dec!(12000))).validate().is_ok());
    assert!(make_profile(None).validate().is_ok());
}

#[test]
fn test_validate_reports_every_missing_field() {
    let profile = UserProfile::new(
        "  ".into(),
        String::new(),
        Occupation::Other,
        String::new(),
        None,
    );
    let err = profile.validate().unwrap_err().to_string();
    assert!(err.contains("Name is required"));
    assert!(err.contains("age range"));
    assert!(err.contains("Location is required"));
}

#[test]
fn test_validate_rejects_unknown_age_range() {
    let mut profile = make_profile(None);
    profile.age_range = "12-17".into();
    let err = profile.validate().unwrap_err().to_string();
    assert!(err.contains("Unknown age range"));
}

#[test]
fn test_validate_rejects_negative_income() {
    assert!(make_profile(Some(dec!(-1))).validate().is_err());
}

#[test]
fn test_profile_json_field_names() {
    let json = serde_json::to_value(make_profile(Some(dec!(9000)))).unwrap();
    assert_eq!(json["ageRange"], "26-35");
    assert_eq!(json["occupation"], "shopkeeper");
    assert!(json.get("monthlyIncome").is_some());

    let json = serde_json::to_value(make_profile(None)).unwrap();
    assert!(json.get("monthlyIncome").is_none());
}

// ── LoanApplication / Progress ────────────────────────────────

#[test]
fn test_application_new_defaults() {
    let app = LoanApplication::new(make_profile(None));
    assert!(app.application_id.starts_with("LOAN"));
    assert_eq!(app.status, ApplicationStatus::Draft);
    assert!(app.eligibility.is_none());
    assert!(app.loan_terms.is_none());
    assert!(app.timestamp > 0);
}

#[test]
fn test_application_status_serde() {
    let json = serde_json::to_string(&ApplicationStatus::Processing).unwrap();
    assert_eq!(json, "\"processing\"");
    assert_eq!(ApplicationStatus::Approved.to_string(), "Approved");
}

#[test]
fn test_progress_data_str() {
    let progress = Progress::new(
        "loan-selected",
        Some(serde_json::json!({ "note": "hello", "amount": 5000 })),
    );
    assert_eq!(progress.current_step, "loan-selected");
    assert_eq!(progress.data_str("note"), Some("hello"));
    assert_eq!(progress.data_str("amount"), None);
    assert_eq!(progress.data_str("missing"), None);
    assert_eq!(Progress::new("x", None).data_str("note"), None);
}

#[test]
fn test_underwriting_result_is_eligible() {
    let mut result = UnderwritingResult {
        score: 70,
        eligible_amount: dec!(10000),
        max_amount: dec!(30000),
        explanation: String::new(),
        risk_factors: vec![],
        recommendations: vec![],
        confidence: 75,
    };
    assert!(result.is_eligible());
    result.eligible_amount = Decimal::ZERO;
    assert!(!result.is_eligible());
}
