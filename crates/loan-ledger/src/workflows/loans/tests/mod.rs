mod common;

mod amortization;
mod eligibility;
