use loan_ledger::workflows::loans::{
    LoanLifecycleService, LoanRepository, LoanServiceError, OperatorConsole,
};
use tracing::{info, warn};

use crate::render;

const MENU: &str = "\nLoan Management\n\
1. Apply for a Loan\n\
2. Display All Loans\n\
3. Update Loan Payment\n\
4. Exit";

/// Interactive main loop. A failed operation is reported and the loop carries
/// on; closed input or option 4 ends it.
pub(crate) fn run_menu<R, C>(service: &LoanLifecycleService<R>, console: &mut C)
where
    R: LoanRepository,
    C: OperatorConsole + ?Sized,
{
    loop {
        console.notify(MENU);
        let Ok(choice) = console.positive_int("Enter your choice") else {
            info!("operator input closed, leaving menu");
            return;
        };

        let result = match choice {
            1 => service
                .apply_for_loan(console)
                .map(|outcome| render::application_message(&outcome)),
            2 => service.loans().map(|records| render::loan_table(&records)),
            3 => service
                .update_loan_details(console)
                .map(|outcome| render::repayment_message(&outcome)),
            4 => {
                console.notify("Exiting.");
                return;
            }
            _ => {
                console.notify("Invalid choice! Try again.");
                continue;
            }
        };

        match result {
            Ok(message) => console.notify(&message),
            Err(LoanServiceError::Input(_)) => {
                info!("operator input closed mid-operation, leaving menu");
                return;
            }
            Err(err) => {
                warn!(choice, error = %err, "menu operation failed");
                console.notify(&format!("Operation failed: {err}"));
            }
        }
    }
}
