mod parser;
mod patterns;

pub use parser::{parse, SmsParser};

/// Five-line demo statement used by the intake flow when the applicant has
/// no SMS of their own to paste.
pub const SAMPLE_SMS: &str = "\
A/c X1234 Credited INR 15,500 by NEFT SALARY JUN2024. Avl Bal: 18,240.67
A/c X1234 Debited INR 2,500 ATM WITHDRAWAL. Avl Bal: 15,740.67
A/c X1234 Credited INR 800 UPI from AMIT PAL. Avl Bal: 16,540.67
A/c X1234 Debited INR 1,200 ELECTRICITY BILL PAYMENT. Avl Bal: 15,340.67
A/c X1234 Credited INR 16,000 by NEFT SALARY JUL2024. Avl Bal: 31,340.67";
