use rust_decimal::Decimal;

use super::config::EligibilityConfig;

/// Amounts are whole cents so every balance can be paid off exactly.
const AMOUNT_SCALE: u32 = 2;

/// A single requested field outside its policy bound. The intake loop re-prompts
/// for that field instead of abandoning the application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitViolation {
    #[error("loan amount must be greater than zero")]
    AmountNotPositive,
    #[error("loan amount {requested} is finer than one cent")]
    AmountBelowCent { requested: Decimal },
    #[error("amount {requested} exceeds loan limit; enter a value up to {max}")]
    AmountAboveLimit { max: Decimal, requested: Decimal },
    #[error("repayment period must be at least one month")]
    TermNotPositive,
    #[error("repayment period of {requested} months exceeds the {max} month maximum")]
    TermAboveLimit { max: u32, requested: u32 },
}

pub(crate) fn check_amount(
    config: &EligibilityConfig,
    requested: Decimal,
) -> Result<Decimal, LimitViolation> {
    if requested <= Decimal::ZERO {
        return Err(LimitViolation::AmountNotPositive);
    }
    if requested.normalize().scale() > AMOUNT_SCALE {
        return Err(LimitViolation::AmountBelowCent { requested });
    }
    if requested > config.max_loan_amount {
        return Err(LimitViolation::AmountAboveLimit {
            max: config.max_loan_amount,
            requested,
        });
    }
    Ok(requested)
}

pub(crate) fn check_term(config: &EligibilityConfig, requested: u32) -> Result<u32, LimitViolation> {
    if requested == 0 {
        return Err(LimitViolation::TermNotPositive);
    }
    if requested > config.max_repayment_months {
        return Err(LimitViolation::TermAboveLimit {
            max: config.max_repayment_months,
            requested,
        });
    }
    Ok(requested)
}
