//! Loan intake, eligibility, amortization, and repayment over a fixed-slot store.

pub mod amortization;
pub mod console;
pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use amortization::{Amortization, AmortizationError, LoanTerms, ScheduleRow};
pub use console::{InputClosed, OperatorConsole};
pub use domain::{
    CustomerNumber, LoanApplication, LoanPurpose, LoanRecord, LoanStatus, PaymentError,
    RecordInvariantError, MAX_PURPOSE_LEN,
};
pub use eligibility::{
    EligibilityConfig, EligibilityError, EligibilityPolicy, LimitViolation, LoanDecision,
    RejectionReason,
};
pub use repository::{LoanRepository, LoanScan, SlotUpdate, StoreError};
pub use service::{ApplicationOutcome, LoanLifecycleService, LoanServiceError, RepaymentOutcome};
pub use store::{FileLoanStore, LayoutError, RECORD_SIZE};
