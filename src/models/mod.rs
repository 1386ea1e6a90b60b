mod application;
mod profile;
mod transaction;
mod underwriting;

pub use application::{ApplicationStatus, LoanApplication, LoanTerms, Progress};
pub use profile::{Occupation, UserProfile, AGE_RANGES};
pub use transaction::{Transaction, TransactionKind};
pub use underwriting::UnderwritingResult;

#[cfg(test)]
mod tests;
