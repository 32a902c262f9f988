use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use loan_ledger::config::{AppConfig, StoreConfig};
use loan_ledger::error::AppError;
use loan_ledger::telemetry;
use loan_ledger::workflows::loans::OperatorConsole;
use tracing::info;

use crate::console::PromptConsole;
use crate::demo::run_demo;
use crate::infra::file_service;
use crate::menu::run_menu;
use crate::render::{self, ListFormat};
use crate::schedule::{run_schedule, ScheduleArgs};

#[derive(Parser, Debug)]
#[command(
    name = "loans",
    about = "Take loan applications, track repayments, and print amortization schedules",
    version
)]
struct Cli {
    /// Override the configured loan store path
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive loan management menu (default command)
    Menu,
    /// Take a single loan application
    Apply,
    /// Print every stored loan record
    List(ListArgs),
    /// Record a payment against a customer's active loan
    Repay,
    /// Print or export a month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Scripted walk-through against an in-memory store
    Demo,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.store {
        config.store = StoreConfig::new(path)?;
    }
    telemetry::init(&config.telemetry)?;

    info!(
        environment = ?config.environment,
        store = %config.store.path.display(),
        "loan ledger ready"
    );

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            run_menu(&file_service(&config.store), &mut PromptConsole::stdio());
            Ok(())
        }
        Command::Apply => {
            let mut console = PromptConsole::stdio();
            let outcome = file_service(&config.store).apply_for_loan(&mut console)?;
            console.notify(&render::application_message(&outcome));
            Ok(())
        }
        Command::List(args) => {
            let records = file_service(&config.store).loans()?;
            render::write_loans(&records, args.format, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Repay => {
            let mut console = PromptConsole::stdio();
            let outcome = file_service(&config.store).update_loan_details(&mut console)?;
            console.notify(&render::repayment_message(&outcome));
            Ok(())
        }
        Command::Schedule(args) => run_schedule(args),
        Command::Demo => run_demo(),
    }
}
