use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::common::*;
use crate::workflows::loans::domain::LoanStatus;
use crate::workflows::loans::eligibility::{
    EligibilityError, EligibilityPolicy, LimitViolation, LoanDecision, RejectionReason,
};

fn policy() -> EligibilityPolicy {
    EligibilityPolicy::new(eligibility_config())
}

#[test]
fn low_credit_score_always_rejects_with_zero_balances() {
    let policy = policy();
    let requests = [
        (dec!(5000), 24),
        (dec!(1), 1),
        (dec!(999999), 60),
        (dec!(12500.75), 7),
    ];

    for (amount, months) in requests {
        for score in [1, 550, 599] {
            let (decision, record) = policy
                .evaluate(application(7, amount, months, score))
                .expect("application within limits");

            assert_eq!(
                decision,
                LoanDecision::Rejected(RejectionReason::LowCreditScore {
                    minimum: 600,
                    actual: score,
                })
            );
            assert_eq!(record.status, LoanStatus::Rejected);
            assert!(record.monthly_installment.is_zero());
            assert!(record.remaining_amount.is_zero());
            assert_eq!(record.loan_amount, amount);
        }
    }
}

#[test]
fn minimum_credit_score_is_inclusive() {
    let (decision, record) = policy()
        .evaluate(application(8, dec!(3000), 6, 600))
        .expect("application within limits");

    assert!(matches!(decision, LoanDecision::Approved(_)));
    assert_eq!(record.status, LoanStatus::Approved);
    assert_eq!(record.remaining_amount, dec!(3000));
}

#[test]
fn approval_populates_installment_and_policy_rate() {
    let (decision, record) = policy()
        .evaluate(application(9, dec!(10000), 12, 700))
        .expect("application within limits");

    assert!(decision.summary().contains("856.07"));
    assert_eq!(record.interest_rate, dec!(5.0));
    assert_eq!(record.monthly_installment.round_dp(2), dec!(856.07));
    assert_eq!(record.remaining_amount, dec!(10000));
    assert_eq!(record.credit_score, 700);
}

#[test]
fn amount_limits_are_enforced() {
    let policy = policy();

    assert_eq!(policy.check_amount(dec!(999999)), Ok(dec!(999999)));
    assert_eq!(policy.check_amount(dec!(0.01)), Ok(dec!(0.01)));
    assert_eq!(
        policy.check_amount(dec!(999999.01)),
        Err(LimitViolation::AmountAboveLimit {
            max: dec!(999999),
            requested: dec!(999999.01),
        })
    );
    assert_eq!(
        policy.check_amount(Decimal::ZERO),
        Err(LimitViolation::AmountNotPositive)
    );
}

#[test]
fn amounts_finer_than_a_cent_are_refused() {
    let policy = policy();

    assert_eq!(
        policy.check_amount(dec!(100.005)),
        Err(LimitViolation::AmountBelowCent {
            requested: dec!(100.005),
        })
    );
    assert_eq!(policy.check_amount(dec!(100.500)), Ok(dec!(100.500)));
    match policy.evaluate(application(11, dec!(2500.001), 12, 700)) {
        Err(EligibilityError::Limit(LimitViolation::AmountBelowCent { .. })) => {}
        other => panic!("expected sub-cent refusal, got {other:?}"),
    }
}

#[test]
fn term_limits_are_enforced() {
    let policy = policy();

    assert_eq!(policy.check_term(60), Ok(60));
    assert_eq!(policy.check_term(1), Ok(1));
    assert_eq!(
        policy.check_term(61),
        Err(LimitViolation::TermAboveLimit {
            max: 60,
            requested: 61,
        })
    );
    assert_eq!(policy.check_term(0), Err(LimitViolation::TermNotPositive));
}

#[test]
fn decide_rechecks_limits_for_non_interactive_callers() {
    let policy = policy();

    match policy.decide(&application(10, dec!(1000000), 12, 720)) {
        Err(EligibilityError::Limit(LimitViolation::AmountAboveLimit { .. })) => {}
        other => panic!("expected amount limit violation, got {other:?}"),
    }
    match policy.decide(&application(10, dec!(1000), 72, 720)) {
        Err(EligibilityError::Limit(LimitViolation::TermAboveLimit { .. })) => {}
        other => panic!("expected term limit violation, got {other:?}"),
    }
}

#[test]
fn rejection_summary_names_the_reason() {
    let reason = RejectionReason::LowCreditScore {
        minimum: 600,
        actual: 550,
    };
    let summary = reason.summary();
    assert!(summary.contains("low credit score"));
    assert!(summary.contains("550"));
}
