use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::console::{InputClosed, OperatorConsole};
use super::domain::{
    CustomerNumber, LoanApplication, LoanPurpose, LoanRecord, PaymentError, MAX_PURPOSE_LEN,
};
use super::eligibility::{
    EligibilityConfig, EligibilityError, EligibilityPolicy, LoanDecision, RejectionReason,
};
use super::repository::{LoanRepository, LoanScan, SlotUpdate, StoreError};

/// Service composing the eligibility policy with the record store.
pub struct LoanLifecycleService<R> {
    repository: Arc<R>,
    policy: EligibilityPolicy,
}

/// What happened to a loan application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationOutcome {
    /// The customer already holds an active loan; nothing was written.
    DeniedActiveLoan { customer: CustomerNumber },
    Approved(LoanRecord),
    Rejected {
        record: LoanRecord,
        reason: RejectionReason,
    },
}

impl ApplicationOutcome {
    /// The appended record, if the application got that far.
    pub fn record(&self) -> Option<&LoanRecord> {
        match self {
            ApplicationOutcome::DeniedActiveLoan { .. } => None,
            ApplicationOutcome::Approved(record) | ApplicationOutcome::Rejected { record, .. } => {
                Some(record)
            }
        }
    }
}

/// What happened during a repayment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepaymentOutcome {
    NotFound { customer: CustomerNumber },
    Cancelled { record: LoanRecord },
    Recorded { payment: Decimal, record: LoanRecord },
}

impl RepaymentOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RepaymentOutcome::Recorded { record, .. } if record.status.is_terminal())
    }
}

impl<R> LoanLifecycleService<R>
where
    R: LoanRepository,
{
    pub fn new(repository: Arc<R>, config: EligibilityConfig) -> Self {
        Self {
            repository,
            policy: EligibilityPolicy::new(config),
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Full scan for an Approved record with a positive balance.
    pub fn has_active_loan(&self, customer: CustomerNumber) -> Result<bool, LoanServiceError> {
        let found = self
            .repository
            .find_first(&mut |record: &LoanRecord| record.is_active_for(customer))?;
        Ok(found.is_some())
    }

    /// Interactive intake: customer first, the active-loan check, then the remaining
    /// fields with per-field re-prompting on limit violations.
    pub fn apply_for_loan<C>(&self, console: &mut C) -> Result<ApplicationOutcome, LoanServiceError>
    where
        C: OperatorConsole + ?Sized,
    {
        let customer = CustomerNumber(console.positive_int("Enter Customer Number")?);
        if self.has_active_loan(customer)? {
            warn!(customer = %customer, "application denied: customer already has an active loan");
            return Ok(ApplicationOutcome::DeniedActiveLoan { customer });
        }

        let purpose = LoanPurpose::new(&console.text("Enter Loan Purpose", MAX_PURPOSE_LEN)?);
        let loan_amount = self.collect_amount(console)?;
        let repayment_months = self.collect_term(console)?;
        let credit_score = console.positive_int("Enter Credit Score")?;

        self.file_application(LoanApplication {
            customer_number: customer,
            purpose,
            loan_amount,
            repayment_months,
            credit_score,
        })
    }

    /// Non-interactive intake for callers that already hold a complete application.
    pub fn submit(
        &self,
        application: LoanApplication,
    ) -> Result<ApplicationOutcome, LoanServiceError> {
        let customer = application.customer_number;
        if self.has_active_loan(customer)? {
            warn!(customer = %customer, "application denied: customer already has an active loan");
            return Ok(ApplicationOutcome::DeniedActiveLoan { customer });
        }
        self.file_application(application)
    }

    /// Lazily decoded records in creation order.
    pub fn records(&self) -> Result<LoanScan<'_>, LoanServiceError> {
        Ok(self.repository.scan()?)
    }

    pub fn loans(&self) -> Result<Vec<LoanRecord>, LoanServiceError> {
        Ok(self.repository.load_all()?)
    }

    /// Interactive repayment: asks for the customer, then runs one session.
    pub fn update_loan_details<C>(
        &self,
        console: &mut C,
    ) -> Result<RepaymentOutcome, LoanServiceError>
    where
        C: OperatorConsole + ?Sized,
    {
        let customer = CustomerNumber(
            console.positive_int("Enter Customer Number to Update Loan Details")?,
        );
        self.repay(customer, console)
    }

    /// One repayment session against the customer's active loan. At most one
    /// successful payment is taken and written back with a single slot rewrite.
    pub fn repay<C>(
        &self,
        customer: CustomerNumber,
        console: &mut C,
    ) -> Result<RepaymentOutcome, LoanServiceError>
    where
        C: OperatorConsole + ?Sized,
    {
        let mut interrupted = None;
        let update = self.repository.find_and_update(
            &mut |record: &LoanRecord| record.is_active_for(customer),
            &mut |record: &LoanRecord| match payment_session(record, &mut *console) {
                Ok(next) => next,
                Err(err) => {
                    interrupted = Some(err);
                    None
                }
            },
        )?;

        if let Some(err) = interrupted {
            return Err(err);
        }

        let outcome = match update {
            None => {
                info!(customer = %customer, "no active loan found for repayment");
                RepaymentOutcome::NotFound { customer }
            }
            Some(SlotUpdate::Untouched { record, .. }) => {
                info!(customer = %customer, "repayment session cancelled");
                RepaymentOutcome::Cancelled { record }
            }
            Some(SlotUpdate::Rewritten {
                slot,
                previous,
                current,
            }) => {
                let payment = previous.remaining_amount - current.remaining_amount;
                info!(
                    customer = %customer,
                    slot,
                    %payment,
                    remaining = %current.remaining_amount,
                    status = current.status.label(),
                    "payment recorded"
                );
                RepaymentOutcome::Recorded {
                    payment,
                    record: current,
                }
            }
        };

        Ok(outcome)
    }

    fn file_application(
        &self,
        application: LoanApplication,
    ) -> Result<ApplicationOutcome, LoanServiceError> {
        let (decision, record) = self.policy.evaluate(application)?;
        self.repository.append(&record)?;

        info!(
            customer = %record.customer_number,
            status = record.status.label(),
            amount = %record.loan_amount,
            months = record.repayment_months,
            "loan application recorded"
        );

        Ok(match decision {
            LoanDecision::Approved(_) => ApplicationOutcome::Approved(record),
            LoanDecision::Rejected(reason) => ApplicationOutcome::Rejected { record, reason },
        })
    }

    fn collect_amount<C>(&self, console: &mut C) -> Result<Decimal, LoanServiceError>
    where
        C: OperatorConsole + ?Sized,
    {
        let prompt = format!(
            "Enter Loan Amount (max {})",
            self.policy.config().max_loan_amount
        );
        loop {
            let requested = console.amount(&prompt)?;
            match self.policy.check_amount(requested) {
                Ok(amount) => return Ok(amount),
                Err(violation) => console.notify(&violation.to_string()),
            }
        }
    }

    fn collect_term<C>(&self, console: &mut C) -> Result<u32, LoanServiceError>
    where
        C: OperatorConsole + ?Sized,
    {
        let prompt = format!(
            "Enter Repayment Period (in months, max {})",
            self.policy.config().max_repayment_months
        );
        loop {
            let requested = console.positive_int(&prompt)?;
            match self.policy.check_term(requested) {
                Ok(months) => return Ok(months),
                Err(violation) => console.notify(&violation.to_string()),
            }
        }
    }
}

/// Prompt until a payment is accepted or the operator cancels with zero.
fn payment_session<C>(
    record: &LoanRecord,
    console: &mut C,
) -> Result<Option<LoanRecord>, LoanServiceError>
where
    C: OperatorConsole + ?Sized,
{
    console.notify(&format!(
        "Loan Amount: {:.2}",
        record.loan_amount.round_dp(2)
    ));
    console.notify(&format!(
        "Remaining Amount: {:.2}",
        record.remaining_amount.round_dp(2)
    ));

    loop {
        let amount = console.amount("Enter Payment Amount (0 to cancel)")?;
        if amount.is_zero() {
            return Ok(None);
        }

        match record.apply_payment(amount) {
            Ok(updated) => return Ok(Some(updated)),
            Err(PaymentError::ExceedsRemaining { .. }) => {
                console.notify("Payment exceeds remaining amount. Please try again.");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Error raised by the lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Input(#[from] InputClosed),
}
