mod config;
mod limits;
mod policy;

pub use config::EligibilityConfig;
pub use limits::LimitViolation;
pub use policy::{LoanDecision, RejectionReason};

use super::amortization::AmortizationError;
use super::domain::{LoanApplication, LoanRecord};
use rust_decimal::Decimal;

/// Stateless policy that applies the configured thresholds to applications.
#[derive(Debug, Clone, Default)]
pub struct EligibilityPolicy {
    config: EligibilityConfig,
}

impl EligibilityPolicy {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn check_amount(&self, requested: Decimal) -> Result<Decimal, LimitViolation> {
        limits::check_amount(&self.config, requested)
    }

    pub fn check_term(&self, requested: u32) -> Result<u32, LimitViolation> {
        limits::check_term(&self.config, requested)
    }

    /// Decide a fully collected application. Limits are re-checked so callers that
    /// skip the interactive loop cannot slip an out-of-bound request through.
    pub fn decide(&self, application: &LoanApplication) -> Result<LoanDecision, EligibilityError> {
        self.check_amount(application.loan_amount)?;
        self.check_term(application.repayment_months)?;
        Ok(policy::decide_outcome(application, &self.config)?)
    }

    /// Decide and build the record to append in one step.
    pub fn evaluate(
        &self,
        application: LoanApplication,
    ) -> Result<(LoanDecision, LoanRecord), EligibilityError> {
        let decision = self.decide(&application)?;
        let record = decision
            .clone()
            .into_record(application, self.config.annual_interest_rate);
        Ok((decision, record))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error(transparent)]
    Limit(#[from] LimitViolation),
    #[error(transparent)]
    Amortization(#[from] AmortizationError),
}
