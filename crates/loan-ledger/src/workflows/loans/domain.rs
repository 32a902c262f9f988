use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Byte capacity of the purpose text inside a stored record.
pub const MAX_PURPOSE_LEN: usize = 64;

/// Key into the external customer register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerNumber(pub u32);

impl fmt::Display for CustomerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form purpose text bounded to [`MAX_PURPOSE_LEN`] bytes of UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanPurpose(String);

impl LoanPurpose {
    /// Drop control characters, trim surrounding whitespace and truncate on a
    /// character boundary so the text always fits its NUL-padded slot field.
    pub fn new(raw: &str) -> Self {
        let printable: String = raw.chars().filter(|c| !c.is_control()).collect();
        let trimmed = printable.trim();
        let mut end = trimmed.len().min(MAX_PURPOSE_LEN);
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        Self(trimmed[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a stored loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Approved,
    Rejected,
    Completed,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Completed => "Completed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Approved" => Some(LoanStatus::Approved),
            "Rejected" => Some(LoanStatus::Rejected),
            "Completed" => Some(LoanStatus::Completed),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, LoanStatus::Rejected | LoanStatus::Completed)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Applicant input once every field has passed the interactive validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub customer_number: CustomerNumber,
    pub purpose: LoanPurpose,
    pub loan_amount: Decimal,
    pub repayment_months: u32,
    pub credit_score: u32,
}

/// One persisted loan. Identity and terms are fixed at creation; only
/// `remaining_amount` and `status` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub customer_number: CustomerNumber,
    pub purpose: LoanPurpose,
    pub loan_amount: Decimal,
    pub repayment_months: u32,
    pub interest_rate: Decimal,
    pub credit_score: u32,
    pub monthly_installment: Decimal,
    pub remaining_amount: Decimal,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// Approved with a positive balance.
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Approved && self.remaining_amount > Decimal::ZERO
    }

    pub fn is_active_for(&self, customer: CustomerNumber) -> bool {
        self.customer_number == customer && self.is_active()
    }

    pub fn validate(&self) -> Result<(), RecordInvariantError> {
        if self.loan_amount <= Decimal::ZERO {
            return Err(RecordInvariantError::NonPositiveAmount(self.loan_amount));
        }

        if self.remaining_amount < Decimal::ZERO || self.remaining_amount > self.loan_amount {
            return Err(RecordInvariantError::RemainingOutOfRange {
                remaining: self.remaining_amount,
                loan_amount: self.loan_amount,
            });
        }

        match self.status {
            LoanStatus::Rejected
                if !self.remaining_amount.is_zero() || !self.monthly_installment.is_zero() =>
            {
                Err(RecordInvariantError::RejectedWithBalance)
            }
            LoanStatus::Completed if !self.remaining_amount.is_zero() => {
                Err(RecordInvariantError::CompletedWithBalance(self.remaining_amount))
            }
            _ => Ok(()),
        }
    }

    /// Produce the record that results from a payment of `amount`.
    ///
    /// The balance is exact decimal arithmetic, so paying the full remainder
    /// always lands on zero and flips the status to `Completed`.
    pub fn apply_payment(&self, amount: Decimal) -> Result<LoanRecord, PaymentError> {
        if !self.is_active() {
            return Err(PaymentError::NotActive(self.status));
        }
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositive(amount));
        }
        if amount > self.remaining_amount {
            return Err(PaymentError::ExceedsRemaining {
                remaining: self.remaining_amount,
                attempted: amount,
            });
        }

        let mut updated = self.clone();
        updated.remaining_amount -= amount;
        if updated.remaining_amount.is_zero() {
            updated.status = LoanStatus::Completed;
        }
        Ok(updated)
    }
}

/// A stored record that breaks one of the per-record balance rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordInvariantError {
    #[error("loan amount must be positive (found {0})")]
    NonPositiveAmount(Decimal),
    #[error("remaining amount {remaining} outside [0, {loan_amount}]")]
    RemainingOutOfRange {
        remaining: Decimal,
        loan_amount: Decimal,
    },
    #[error("rejected loans carry no installment or balance")]
    RejectedWithBalance,
    #[error("completed loan still owes {0}")]
    CompletedWithBalance(Decimal),
}

/// Reasons a payment cannot be applied to a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("loan is {0} and accepts no payments")]
    NotActive(LoanStatus),
    #[error("payment must be positive (found {0})")]
    NonPositive(Decimal),
    #[error("payment {attempted} exceeds remaining amount {remaining}")]
    ExceedsRemaining {
        remaining: Decimal,
        attempted: Decimal,
    },
}
