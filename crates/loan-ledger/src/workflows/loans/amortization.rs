//! Fixed-rate, equal-installment amortization.
//!
//! `PMT = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate derived from an
//! annual percentage. A zero rate degrades to straight-line repayment `P / n`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR_PERCENT: Decimal = dec!(1200);

/// Principal, annual rate in percent, and term in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Decimal,
    pub annual_rate_pct: Decimal,
    pub months: u32,
}

impl LoanTerms {
    pub fn new(principal: Decimal, annual_rate_pct: Decimal, months: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            months,
        }
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_pct / MONTHS_PER_YEAR_PERCENT
    }

    fn validate(&self) -> Result<(), AmortizationError> {
        if self.principal <= Decimal::ZERO {
            return Err(AmortizationError::NonPositivePrincipal(self.principal));
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(AmortizationError::NegativeRate(self.annual_rate_pct));
        }
        if self.months == 0 {
            return Err(AmortizationError::ZeroTerm);
        }
        Ok(())
    }
}

/// Financial state seeded on approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amortization {
    pub monthly_installment: Decimal,
    pub remaining_amount: Decimal,
}

/// One month of an amortization schedule, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmortizationError {
    #[error("principal must be positive (found {0})")]
    NonPositivePrincipal(Decimal),
    #[error("interest rate must not be negative (found {0})")]
    NegativeRate(Decimal),
    #[error("repayment term must be at least one month")]
    ZeroTerm,
    #[error("compounding over {months} months overflowed decimal range")]
    Overflow { months: u32 },
}

/// Monthly installment at full decimal precision.
pub fn monthly_installment(terms: &LoanTerms) -> Result<Decimal, AmortizationError> {
    terms.validate()?;

    let rate = terms.monthly_rate();
    if rate.is_zero() {
        return Ok(terms.principal / Decimal::from(terms.months));
    }

    let compound = compound_factor(rate, terms.months)?;
    let overflow = AmortizationError::Overflow {
        months: terms.months,
    };
    let numerator = terms
        .principal
        .checked_mul(rate)
        .and_then(|value| value.checked_mul(compound))
        .ok_or_else(|| overflow.clone())?;
    numerator
        .checked_div(compound - Decimal::ONE)
        .ok_or(overflow)
}

/// Installment plus the opening balance of a freshly approved loan.
pub fn amortize(terms: &LoanTerms) -> Result<Amortization, AmortizationError> {
    let monthly_installment = monthly_installment(terms)?;
    Ok(Amortization {
        monthly_installment,
        remaining_amount: terms.principal,
    })
}

/// Month-by-month breakdown. The final period absorbs rounding so the closing
/// balance is exactly zero.
pub fn schedule(terms: &LoanTerms) -> Result<Vec<ScheduleRow>, AmortizationError> {
    let installment = monthly_installment(terms)?.round_dp(2);
    let rate = terms.monthly_rate();

    let mut balance = terms.principal;
    let mut rows = Vec::new();
    for period in 1..=terms.months {
        let interest = (balance * rate).round_dp(2);
        let payment = if period == terms.months {
            balance + interest
        } else {
            installment.min(balance + interest)
        };
        let principal = payment - interest;
        balance -= principal;

        rows.push(ScheduleRow {
            period,
            payment,
            interest,
            principal,
            balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    Ok(rows)
}

/// `(1 + r)^n` by checked repeated multiplication.
fn compound_factor(rate: Decimal, months: u32) -> Result<Decimal, AmortizationError> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..months {
        result = result
            .checked_mul(factor)
            .ok_or(AmortizationError::Overflow { months })?;
    }
    Ok(result)
}
