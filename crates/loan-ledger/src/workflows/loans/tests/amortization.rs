use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::workflows::loans::amortization::{
    amortize, monthly_installment, schedule, AmortizationError, LoanTerms,
};

#[test]
fn installment_for_ten_thousand_over_a_year() {
    let terms = LoanTerms::new(dec!(10000), dec!(5.0), 12);

    let amortization = amortize(&terms).expect("valid terms");

    assert_eq!(amortization.monthly_installment.round_dp(2), dec!(856.07));
    assert!((amortization.monthly_installment - dec!(856.07)).abs() < dec!(0.01));
    assert_eq!(amortization.remaining_amount, dec!(10000));
}

#[test]
fn installment_is_positive_and_covers_principal() {
    let amounts = [dec!(0.01), dec!(1), dec!(2500.50), dec!(10000), dec!(999999)];
    let terms = [1u32, 2, 12, 37, 60];

    for amount in amounts {
        for months in terms {
            let installment = monthly_installment(&LoanTerms::new(amount, dec!(5.0), months))
                .expect("valid terms");
            assert!(installment > Decimal::ZERO, "{amount} over {months}");
            assert!(
                installment * Decimal::from(months) >= amount,
                "{installment} x {months} does not cover {amount}"
            );
        }
    }
}

#[test]
fn single_month_installment_is_principal_plus_one_month_interest() {
    let installment =
        monthly_installment(&LoanTerms::new(dec!(1200), dec!(5.0), 1)).expect("valid terms");
    assert_eq!(installment.round_dp(2), dec!(1205.00));
}

#[test]
fn zero_rate_falls_back_to_straight_line() {
    let installment =
        monthly_installment(&LoanTerms::new(dec!(1200), Decimal::ZERO, 12)).expect("valid terms");
    assert_eq!(installment, dec!(100));
}

#[test]
fn rejects_invalid_terms() {
    assert_eq!(
        monthly_installment(&LoanTerms::new(dec!(1000), dec!(5.0), 0)),
        Err(AmortizationError::ZeroTerm)
    );
    assert_eq!(
        monthly_installment(&LoanTerms::new(Decimal::ZERO, dec!(5.0), 12)),
        Err(AmortizationError::NonPositivePrincipal(Decimal::ZERO))
    );
    assert_eq!(
        monthly_installment(&LoanTerms::new(dec!(1000), dec!(-1), 12)),
        Err(AmortizationError::NegativeRate(dec!(-1)))
    );
}

#[test]
fn extreme_terms_report_overflow_instead_of_panicking() {
    let result = monthly_installment(&LoanTerms::new(dec!(1000), dec!(5.0), 100_000));
    assert_eq!(result, Err(AmortizationError::Overflow { months: 100_000 }));
}

#[test]
fn schedule_retires_the_balance_exactly() {
    let terms = LoanTerms::new(dec!(10000), dec!(5.0), 12);

    let rows = schedule(&terms).expect("valid terms");

    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].payment, dec!(856.07));
    assert_eq!(rows[0].interest, dec!(41.67));
    assert_eq!(rows[0].principal, dec!(814.40));
    assert_eq!(rows[0].balance, dec!(9185.60));

    let last = rows.last().expect("at least one row");
    assert_eq!(last.period, 12);
    assert!(last.balance.is_zero());

    let principal: Decimal = rows.iter().map(|row| row.principal).sum();
    assert_eq!(principal, dec!(10000));
    assert!(rows
        .windows(2)
        .all(|pair| pair[1].balance < pair[0].balance));
}

#[test]
fn zero_rate_schedule_is_interest_free() {
    let rows = schedule(&LoanTerms::new(dec!(1000), Decimal::ZERO, 3)).expect("valid terms");

    assert!(rows.iter().all(|row| row.interest.is_zero()));
    let paid: Decimal = rows.iter().map(|row| row.payment).sum();
    assert_eq!(paid, dec!(1000));
    assert!(rows.last().expect("rows").balance.is_zero());
}
