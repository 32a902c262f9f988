use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Static business thresholds applied to every application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub max_loan_amount: Decimal,
    pub max_repayment_months: u32,
    pub minimum_credit_score: u32,
    /// Annual percentage rate written onto every approved loan.
    pub annual_interest_rate: Decimal,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            max_loan_amount: dec!(999999),
            max_repayment_months: 60,
            minimum_credit_score: 600,
            annual_interest_rate: dec!(5.0),
        }
    }
}
