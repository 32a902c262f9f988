use std::io::{self, Cursor};
use std::sync::Arc;

use loan_ledger::error::AppError;
use loan_ledger::workflows::loans::{
    CustomerNumber, EligibilityConfig, LoanLifecycleService, OperatorConsole,
};

use crate::console::PromptConsole;
use crate::infra::InMemoryLoanStore;
use crate::render;

/// Operator answers for the walk-through, one per prompt in order.
const SCRIPT: &str = "\
1001\nHome renovation\n10000\n12\n700\n\
1002\nCar\n5000\n24\n550\n\
1001\n\
20000\n10000\n";

pub(crate) fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(InMemoryLoanStore::default());
    let service = LoanLifecycleService::new(store, EligibilityConfig::default());
    let mut console =
        PromptConsole::new(Cursor::new(SCRIPT.as_bytes()), io::stdout()).echoing();

    println!("Loan ledger demo (in-memory store)");

    println!("\n1. Approved application");
    let outcome = service.apply_for_loan(&mut console)?;
    console.notify(&render::application_message(&outcome));

    println!("\n2. Rejected application (credit score below minimum)");
    let outcome = service.apply_for_loan(&mut console)?;
    console.notify(&render::application_message(&outcome));

    println!("\n3. Second application while a loan is active");
    let outcome = service.apply_for_loan(&mut console)?;
    console.notify(&render::application_message(&outcome));

    println!("\n4. Repayment with an overpayment retry");
    let outcome = service.repay(CustomerNumber(1001), &mut console)?;
    console.notify(&render::repayment_message(&outcome));

    println!("\n5. Ledger after the session");
    console.notify(&render::loan_table(&service.loans()?));

    Ok(())
}
