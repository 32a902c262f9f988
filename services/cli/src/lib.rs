mod cli;
mod console;
mod demo;
mod infra;
mod menu;
mod render;
mod schedule;

use loan_ledger::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
