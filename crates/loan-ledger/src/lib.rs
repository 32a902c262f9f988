//! Loan ledger: eligibility decisions, fixed-rate amortization, and repayment
//! tracking persisted in a fixed-slot record file.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
