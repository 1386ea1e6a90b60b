use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{UnderwritingResult, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Draft,
    Processing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Processing => "Processing",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repayment terms for a chosen amount and tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub amount: Decimal,
    pub tenure_months: u32,
    pub emi: i64,
    pub annual_rate: Decimal,
    pub total_amount: Decimal,
    pub total_interest: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub application_id: String,
    pub profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_sms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<UnderwritingResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_terms: Option<LoanTerms>,
    pub status: ApplicationStatus,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl LoanApplication {
    pub fn new(profile: UserProfile) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis();
        Self {
            application_id: format!("LOAN{timestamp}"),
            profile,
            bank_sms: None,
            eligibility: None,
            loan_terms: None,
            status: ApplicationStatus::Draft,
            timestamp,
        }
    }
}

/// Where the applicant is in the intake flow, plus whatever that step saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current_step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: i64,
}

impl Progress {
    pub fn new(step: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            current_step: step.to_string(),
            data,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Read a string field out of the step data.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.as_ref()?.get(field)?.as_str()
    }
}
