use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Age brackets offered by the intake form.
pub const AGE_RANGES: &[&str] = &["18-25", "26-35", "36-45", "46-60", "60+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Occupation {
    Farmer,
    Teacher,
    Shopkeeper,
    Driver,
    Worker,
    Other,
}

impl Occupation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Teacher => "teacher",
            Self::Shopkeeper => "shopkeeper",
            Self::Driver => "driver",
            Self::Worker => "worker",
            Self::Other => "other",
        }
    }

    /// Total over all input: anything unrecognised is `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Self::Farmer,
            "teacher" => Self::Teacher,
            "shopkeeper" => Self::Shopkeeper,
            "driver" => Self::Driver,
            "worker" => Self::Worker,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [Occupation] {
        &[
            Self::Farmer,
            Self::Teacher,
            Self::Shopkeeper,
            Self::Driver,
            Self::Worker,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Occupation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Occupation {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Occupation> for &'static str {
    fn from(o: Occupation) -> Self {
        o.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age_range: String,
    pub occupation: Occupation,
    pub locality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Decimal>,
}

impl UserProfile {
    pub fn new(
        name: String,
        age_range: String,
        occupation: Occupation,
        locality: String,
        monthly_income: Option<Decimal>,
    ) -> Self {
        Self {
            name,
            age_range,
            occupation,
            locality,
            monthly_income,
        }
    }

    /// Declared income, treating an absent or non-positive figure as missing.
    pub fn declared_income(&self) -> Option<Decimal> {
        self.monthly_income.filter(|income| *income > Decimal::ZERO)
    }

    /// Apply the intake form's required-field rules.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.age_range.trim().is_empty() {
            errors.push("Please select your age range".to_string());
        } else if !AGE_RANGES.contains(&self.age_range.trim()) {
            errors.push(format!(
                "Unknown age range '{}' (expected one of {})",
                self.age_range,
                AGE_RANGES.join(", ")
            ));
        }
        if self.locality.trim().is_empty() {
            errors.push("Location is required".to_string());
        }
        if let Some(income) = self.monthly_income {
            if income < Decimal::ZERO {
                errors.push("Monthly income cannot be negative".to_string());
            }
        }

        if !errors.is_empty() {
            anyhow::bail!("Invalid profile: {}", errors.join("; "));
        }
        Ok(())
    }
}
