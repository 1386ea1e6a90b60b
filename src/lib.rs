//! SMS transaction parsing and heuristic loan underwriting.
//!
//! [`sms`] turns pasted bank SMS text into [`models::Transaction`]s,
//! [`underwriting`] scores them against a [`models::UserProfile`] and sizes a
//! loan offer, and [`offer`] prices the applicant's chosen amount and tenure.
//! [`store`] persists intake state behind a plain key-value interface.

pub mod config;
pub mod format;
pub mod models;
pub mod offer;
pub mod sms;
pub mod store;
pub mod telemetry;
pub mod underwriting;

pub use underwriting::{calculate_emi, calculate_underwriting, Underwriter};
