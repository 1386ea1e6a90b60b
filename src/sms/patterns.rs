use crate::models::TransactionKind;

/// Transaction patterns, evaluated top to bottom. Every credit entry sits
/// above every debit entry; reordering changes how ambiguous lines resolve.
pub(super) const TRANSACTION_PATTERNS: &[(TransactionKind, &str)] = &[
    (
        TransactionKind::Credit,
        r"(?i)credited.*?INR\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
    (
        TransactionKind::Credit,
        r"(?i)received.*?Rs\.?\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
    (
        TransactionKind::Credit,
        r"(?i)deposit.*?₹\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
    (
        TransactionKind::Debit,
        r"(?i)debited.*?INR\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
    (
        TransactionKind::Debit,
        r"(?i)withdrawn.*?Rs\.?\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
    (
        TransactionKind::Debit,
        r"(?i)purchase.*?₹\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    ),
];

/// Balance patterns; first match wins.
pub(super) const BALANCE_PATTERNS: &[&str] = &[
    r"(?i)(?:avl|available).*?bal(?:ance)?.*?₹?\s*(\d+(?:,\d+)*(?:\.\d+)?)",
    r"(?i)balance.*?₹?\s*(\d+(?:,\d+)*(?:\.\d+)?)",
];

/// Loose day/month[/year] pattern. Year is optional.
pub(super) const DATE_PATTERN: &str = r"(\d{1,2})[/-](\d{1,2})[/-]?(\d{2,4})?";
