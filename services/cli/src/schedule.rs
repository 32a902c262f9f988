use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, Months, NaiveDate};
use clap::Args;
use loan_ledger::error::AppError;
use loan_ledger::workflows::loans::amortization::schedule;
use loan_ledger::workflows::loans::{EligibilityPolicy, LimitViolation, LoanTerms, ScheduleRow};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::render::money;

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// Principal to amortize
    #[arg(long)]
    pub(crate) amount: Decimal,
    /// Repayment period in months
    #[arg(long)]
    pub(crate) months: u32,
    /// Annual interest rate in percent (defaults to the policy rate)
    #[arg(long)]
    pub(crate) rate: Option<Decimal>,
    /// First due date (YYYY-MM-DD). Defaults to one month from today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) first_due: Option<NaiveDate>,
    /// Write the schedule as CSV to this path instead of printing a table
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

/// One schedule period with its calendar due date attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DatedRow {
    pub(crate) period: u32,
    pub(crate) due_date: NaiveDate,
    pub(crate) payment: Decimal,
    pub(crate) interest: Decimal,
    pub(crate) principal: Decimal,
    pub(crate) balance: Decimal,
}

pub(crate) fn run_schedule(args: ScheduleArgs) -> Result<(), AppError> {
    let ScheduleArgs {
        amount,
        months,
        rate,
        first_due,
        csv,
    } = args;

    let terms = schedule_terms(amount, months, rate)?;
    let first_due = match first_due {
        Some(date) => date,
        None => next_month(Local::now().date_naive())?,
    };
    let rows = attach_due_dates(&schedule(&terms)?, first_due)?;

    match csv {
        Some(path) => {
            write_csv(&path, &rows)?;
            info!(periods = rows.len(), path = %path.display(), "amortization schedule exported");
            println!("Wrote {} periods to {}", rows.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_table(&terms, &rows, &mut stdout.lock())?;
        }
    }
    Ok(())
}

/// Schedule requests are held to the same amount and term limits as applications.
pub(crate) fn schedule_terms(
    amount: Decimal,
    months: u32,
    rate: Option<Decimal>,
) -> Result<LoanTerms, LimitViolation> {
    let policy = EligibilityPolicy::default();
    let principal = policy.check_amount(amount)?;
    let months = policy.check_term(months)?;
    let rate = rate.unwrap_or(policy.config().annual_interest_rate);
    Ok(LoanTerms::new(principal, rate, months))
}

pub(crate) fn attach_due_dates(
    rows: &[ScheduleRow],
    first_due: NaiveDate,
) -> Result<Vec<DatedRow>, io::Error> {
    rows.iter()
        .map(|row| {
            let due_date = first_due
                .checked_add_months(Months::new(row.period - 1))
                .ok_or_else(|| out_of_range(first_due))?;
            Ok(DatedRow {
                period: row.period,
                due_date,
                payment: row.payment,
                interest: row.interest,
                principal: row.principal,
                balance: row.balance,
            })
        })
        .collect()
}

fn next_month(today: NaiveDate) -> Result<NaiveDate, io::Error> {
    today
        .checked_add_months(Months::new(1))
        .ok_or_else(|| out_of_range(today))
}

fn out_of_range(date: NaiveDate) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("due dates starting {date} run past the supported calendar range"),
    )
}

pub(crate) fn write_csv(path: &Path, rows: &[DatedRow]) -> Result<(), io::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()
}

fn write_table<W: Write>(terms: &LoanTerms, rows: &[DatedRow], out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Amortization schedule: {} over {} months at {}% p.a.",
        money(terms.principal),
        terms.months,
        terms.annual_rate_pct
    )?;
    writeln!(
        out,
        "{:>6} | {:<10} | {:>12} | {:>10} | {:>12} | {:>12}",
        "Period", "Due", "Payment", "Interest", "Principal", "Balance"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>6} | {:<10} | {:>12} | {:>10} | {:>12} | {:>12}",
            row.period,
            row.due_date.to_string(),
            money(row.payment),
            money(row.interest),
            money(row.principal),
            money(row.balance)
        )?;
    }

    let total_paid: Decimal = rows.iter().map(|row| row.payment).sum();
    let total_interest: Decimal = rows.iter().map(|row| row.interest).sum();
    writeln!(
        out,
        "Total paid {} | total interest {}",
        money(total_paid),
        money(total_interest)
    )
}
