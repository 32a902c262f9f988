use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::workflows::loans::console::{InputClosed, OperatorConsole};
use crate::workflows::loans::domain::{
    CustomerNumber, LoanApplication, LoanPurpose, LoanRecord, LoanStatus,
};
use crate::workflows::loans::eligibility::EligibilityConfig;
use crate::workflows::loans::repository::{LoanRepository, LoanScan, SlotUpdate, StoreError};
use crate::workflows::loans::service::LoanLifecycleService;

pub(super) fn eligibility_config() -> EligibilityConfig {
    EligibilityConfig::default()
}

pub(super) fn application(
    customer: u32,
    loan_amount: Decimal,
    repayment_months: u32,
    credit_score: u32,
) -> LoanApplication {
    LoanApplication {
        customer_number: CustomerNumber(customer),
        purpose: LoanPurpose::new("Working capital"),
        loan_amount,
        repayment_months,
        credit_score,
    }
}

pub(super) fn approved_record(customer: u32, loan_amount: Decimal, remaining: Decimal) -> LoanRecord {
    LoanRecord {
        customer_number: CustomerNumber(customer),
        purpose: LoanPurpose::new("Equipment"),
        loan_amount,
        repayment_months: 12,
        interest_rate: dec!(5.0),
        credit_score: 710,
        monthly_installment: dec!(171.21),
        remaining_amount: remaining,
        status: LoanStatus::Approved,
    }
}

pub(super) fn rejected_record(customer: u32) -> LoanRecord {
    LoanRecord {
        customer_number: CustomerNumber(customer),
        purpose: LoanPurpose::new("Vacation"),
        loan_amount: dec!(5000),
        repayment_months: 24,
        interest_rate: dec!(5.0),
        credit_score: 550,
        monthly_installment: Decimal::ZERO,
        remaining_amount: Decimal::ZERO,
        status: LoanStatus::Rejected,
    }
}

pub(super) fn completed_record(customer: u32) -> LoanRecord {
    LoanRecord {
        remaining_amount: Decimal::ZERO,
        status: LoanStatus::Completed,
        ..approved_record(customer, dec!(1200), Decimal::ZERO)
    }
}

pub(super) fn service(store: &Arc<MemoryLoanStore>) -> LoanLifecycleService<MemoryLoanStore> {
    LoanLifecycleService::new(store.clone(), eligibility_config())
}

pub(super) fn assert_balances_within_bounds(records: &[LoanRecord]) {
    for record in records {
        assert!(
            record.remaining_amount >= Decimal::ZERO
                && record.remaining_amount <= record.loan_amount,
            "balance out of range: {record:?}"
        );
        record.validate().expect("record invariants hold");
    }
}

/// Vec-backed store mirroring the file store's first-match rewrite contract.
#[derive(Default)]
pub(super) struct MemoryLoanStore {
    records: Mutex<Vec<LoanRecord>>,
    rewrites: Mutex<usize>,
}

impl MemoryLoanStore {
    pub(super) fn seeded(records: Vec<LoanRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            rewrites: Mutex::new(0),
        })
    }

    pub(super) fn snapshot(&self) -> Vec<LoanRecord> {
        self.records.lock().expect("lock").clone()
    }

    pub(super) fn rewrites(&self) -> usize {
        *self.rewrites.lock().expect("lock")
    }
}

impl LoanRepository for MemoryLoanStore {
    fn append(&self, record: &LoanRecord) -> Result<(), StoreError> {
        record.validate()?;
        self.records.lock().expect("lock").push(record.clone());
        Ok(())
    }

    fn scan(&self) -> Result<LoanScan<'_>, StoreError> {
        Ok(Box::new(self.snapshot().into_iter().map(Ok)))
    }

    fn find_and_update(
        &self,
        predicate: &mut dyn FnMut(&LoanRecord) -> bool,
        mutate: &mut dyn FnMut(&LoanRecord) -> Option<LoanRecord>,
    ) -> Result<Option<SlotUpdate>, StoreError> {
        let mut guard = self.records.lock().expect("lock");
        let Some(index) = guard.iter().position(|record| predicate(record)) else {
            return Ok(None);
        };

        let previous = guard[index].clone();
        let slot = index as u64;
        match mutate(&previous) {
            None => Ok(Some(SlotUpdate::Untouched {
                slot,
                record: previous,
            })),
            Some(current) => {
                current.validate()?;
                guard[index] = current.clone();
                *self.rewrites.lock().expect("lock") += 1;
                Ok(Some(SlotUpdate::Rewritten {
                    slot,
                    previous,
                    current,
                }))
            }
        }
    }
}

/// Console fed from a fixed list of answers. Answers are trusted to satisfy the
/// validator contract, as the real console guarantees.
#[derive(Debug, Default)]
pub(super) struct ScriptedConsole {
    answers: VecDeque<String>,
    pub(super) prompts: Vec<String>,
    pub(super) notices: Vec<String>,
}

impl ScriptedConsole {
    pub(super) fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String, InputClosed> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(InputClosed)
    }

    pub(super) fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl OperatorConsole for ScriptedConsole {
    fn positive_int(&mut self, prompt: &str) -> Result<u32, InputClosed> {
        let raw = self.next_answer(prompt)?;
        Ok(raw.parse().expect("scripted integer answer"))
    }

    fn amount(&mut self, prompt: &str) -> Result<Decimal, InputClosed> {
        let raw = self.next_answer(prompt)?;
        Ok(raw.parse().expect("scripted amount answer"))
    }

    fn text(&mut self, prompt: &str, _max_len: usize) -> Result<String, InputClosed> {
        self.next_answer(prompt)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Unique directory under the system temp dir, removed on drop.
pub(super) struct ScratchDir(PathBuf);

impl ScratchDir {
    pub(super) fn new(label: &str) -> Self {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        let id = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "loan-ledger-{label}-{}-{id}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    pub(super) fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}
