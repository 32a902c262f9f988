use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::amortization::{amortize, Amortization, AmortizationError, LoanTerms};
use super::super::domain::{LoanApplication, LoanRecord, LoanStatus};
use super::config::EligibilityConfig;

/// Adjudication outcome for a completed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanDecision {
    Approved(Amortization),
    Rejected(RejectionReason),
}

impl LoanDecision {
    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved(amortization) => format!(
                "loan approved with monthly installment {:.2}",
                amortization.monthly_installment.round_dp(2)
            ),
            LoanDecision::Rejected(reason) => reason.summary(),
        }
    }

    /// Materialize the record appended for this decision.
    pub fn into_record(self, application: LoanApplication, interest_rate: Decimal) -> LoanRecord {
        let (monthly_installment, remaining_amount, status) = match self {
            LoanDecision::Approved(amortization) => (
                amortization.monthly_installment,
                amortization.remaining_amount,
                LoanStatus::Approved,
            ),
            LoanDecision::Rejected(_) => (Decimal::ZERO, Decimal::ZERO, LoanStatus::Rejected),
        };

        LoanRecord {
            customer_number: application.customer_number,
            purpose: application.purpose,
            loan_amount: application.loan_amount,
            repayment_months: application.repayment_months,
            interest_rate,
            credit_score: application.credit_score,
            monthly_installment,
            remaining_amount,
            status,
        }
    }
}

/// Why an application was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    LowCreditScore { minimum: u32, actual: u32 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::LowCreditScore { minimum, actual } => format!(
                "rejected due to low credit score ({actual} below minimum {minimum})"
            ),
        }
    }
}

pub(crate) fn decide_outcome(
    application: &LoanApplication,
    config: &EligibilityConfig,
) -> Result<LoanDecision, AmortizationError> {
    if application.credit_score < config.minimum_credit_score {
        return Ok(LoanDecision::Rejected(RejectionReason::LowCreditScore {
            minimum: config.minimum_credit_score,
            actual: application.credit_score,
        }));
    }

    let terms = LoanTerms::new(
        application.loan_amount,
        config.annual_interest_rate,
        application.repayment_months,
    );
    amortize(&terms).map(LoanDecision::Approved)
}
