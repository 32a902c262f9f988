use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use loan_ledger::workflows::loans::{ApplicationOutcome, LoanRecord, RepaymentOutcome};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ListFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

pub(crate) fn application_message(outcome: &ApplicationOutcome) -> String {
    match outcome {
        ApplicationOutcome::DeniedActiveLoan { .. } => {
            "Customer already has an active loan. Loan application denied.".to_string()
        }
        ApplicationOutcome::Approved(record) => format!(
            "Loan Approved.\nMonthly Installment: {}\nLoan application processed successfully.",
            money(record.monthly_installment)
        ),
        ApplicationOutcome::Rejected { reason, .. } => format!(
            "Loan application {}.\nLoan application processed successfully.",
            reason.summary()
        ),
    }
}

pub(crate) fn repayment_message(outcome: &RepaymentOutcome) -> String {
    match outcome {
        RepaymentOutcome::NotFound { customer } => {
            format!("Loan not found for customer number {customer}.")
        }
        RepaymentOutcome::Cancelled { .. } => "Payment cancelled.".to_string(),
        RepaymentOutcome::Recorded { record, .. } => {
            let mut message = format!(
                "Payment recorded successfully.\nRemaining Amount: {}",
                money(record.remaining_amount)
            );
            if outcome.is_completed() {
                message.push_str("\nLoan fully repaid. Congratulations!");
            }
            message
        }
    }
}

pub(crate) fn loan_table(records: &[LoanRecord]) -> String {
    if records.is_empty() {
        return "No loans found.".to_string();
    }

    let mut table = format!(
        "{:<12} | {:<24} | {:>12} | {:>6} | {:>8} | {:>12} | {:>12} | {:<10}",
        "Customer No.", "Purpose", "Amount", "Months", "Interest", "Installment", "Remaining", "Status"
    );
    for record in records {
        let _ = write!(
            table,
            "\n{:<12} | {:<24} | {:>12} | {:>6} | {:>8} | {:>12} | {:>12} | {:<10}",
            record.customer_number.to_string(),
            record.purpose.as_str(),
            money(record.loan_amount),
            record.repayment_months,
            money(record.interest_rate),
            money(record.monthly_installment),
            money(record.remaining_amount),
            record.status.label()
        );
    }
    table
}

pub(crate) fn write_loans<W: Write>(
    records: &[LoanRecord],
    format: ListFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        ListFormat::Table => writeln!(out, "{}", loan_table(records)),
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)
        }
    }
}
