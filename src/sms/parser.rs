use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::{BALANCE_PATTERNS, DATE_PATTERN, TRANSACTION_PATTERNS};
use crate::models::{Transaction, TransactionKind};

/// Turns free-form bank SMS text into transactions.
///
/// Holds only compiled patterns, so one instance can be shared freely or
/// built per call.
pub struct SmsParser {
    transaction_patterns: Vec<(TransactionKind, Regex)>,
    balance_patterns: Vec<Regex>,
    date_pattern: Regex,
    today: Option<NaiveDate>,
}

impl SmsParser {
    pub fn new() -> Result<Self> {
        let transaction_patterns = TRANSACTION_PATTERNS
            .iter()
            .map(|(kind, pattern)| {
                Regex::new(pattern)
                    .map(|re| (*kind, re))
                    .with_context(|| format!("Invalid transaction pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let balance_patterns = BALANCE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("Invalid balance pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let date_pattern = Regex::new(DATE_PATTERN).context("Invalid date pattern")?;

        Ok(Self {
            transaction_patterns,
            balance_patterns,
            date_pattern,
            today: None,
        })
    }

    /// Pin the date used when a line carries none (and the year used when a
    /// date has no year). Without this the local clock is read per parse.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Parse every line of `text`. Lines that match no pattern are skipped.
    pub fn parse(&self, text: &str) -> Vec<Transaction> {
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let transactions: Vec<Transaction> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.parse_line(line, today))
            .collect();

        debug!(count = transactions.len(), "parsed bank SMS");
        transactions
    }

    fn parse_line(&self, line: &str, today: NaiveDate) -> Option<Transaction> {
        let Some((kind, amount)) = self.match_transaction(line) else {
            trace!(line, "no transaction pattern matched");
            return None;
        };

        let balance_after = self.match_balance(line);
        let occurred_at = self.extract_date(line, today).unwrap_or(today);
        debug!(%kind, %amount, ?balance_after, "matched SMS line");

        Some(Transaction {
            kind,
            amount,
            description: line.to_string(),
            occurred_at,
            balance_after,
        })
    }

    fn match_transaction(&self, line: &str) -> Option<(TransactionKind, Decimal)> {
        for (kind, re) in &self.transaction_patterns {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            match parse_amount(&caps[1]) {
                Some(amount) if amount > Decimal::ZERO => return Some((*kind, amount)),
                _ => debug!(raw = &caps[1], "rejected unusable amount"),
            }
        }
        None
    }

    fn match_balance(&self, line: &str) -> Option<Decimal> {
        self.balance_patterns
            .iter()
            .find_map(|re| re.captures(line).and_then(|caps| parse_amount(&caps[1])))
    }

    fn extract_date(&self, line: &str, today: NaiveDate) -> Option<NaiveDate> {
        let caps = self.date_pattern.captures(line)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(m) => {
                let y: i32 = m.as_str().parse().ok()?;
                if m.as_str().len() == 2 {
                    2000 + y
                } else {
                    y
                }
            }
            None => today.year(),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Parse `text` with a freshly built parser.
pub fn parse(text: &str) -> Result<Vec<Transaction>> {
    Ok(SmsParser::new()?.parse(text))
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace(',', "")).ok()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
