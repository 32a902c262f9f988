use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use loan_ledger::config::StoreConfig;
use loan_ledger::workflows::loans::{
    EligibilityConfig, FileLoanStore, LoanLifecycleService, LoanRecord, LoanRepository, LoanScan,
    SlotUpdate, StoreError,
};

pub(crate) fn file_service(config: &StoreConfig) -> LoanLifecycleService<FileLoanStore> {
    LoanLifecycleService::new(
        Arc::new(FileLoanStore::new(config.path.clone())),
        EligibilityConfig::default(),
    )
}

/// Volatile store used by the demo; same first-match rewrite contract as the file.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanStore {
    records: Arc<Mutex<Vec<LoanRecord>>>,
}

impl InMemoryLoanStore {
    fn guard(&self) -> MutexGuard<'_, Vec<LoanRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoanRepository for InMemoryLoanStore {
    fn append(&self, record: &LoanRecord) -> Result<(), StoreError> {
        record.validate()?;
        self.guard().push(record.clone());
        Ok(())
    }

    fn scan(&self) -> Result<LoanScan<'_>, StoreError> {
        let records = self.guard().clone();
        Ok(Box::new(records.into_iter().map(Ok)))
    }

    fn find_and_update(
        &self,
        predicate: &mut dyn FnMut(&LoanRecord) -> bool,
        mutate: &mut dyn FnMut(&LoanRecord) -> Option<LoanRecord>,
    ) -> Result<Option<SlotUpdate>, StoreError> {
        let mut records = self.guard();
        let Some(index) = records.iter().position(|record| predicate(record)) else {
            return Ok(None);
        };

        let slot = index as u64;
        let previous = records[index].clone();
        let Some(current) = mutate(&previous) else {
            return Ok(Some(SlotUpdate::Untouched {
                slot,
                record: previous,
            }));
        };
        current.validate()?;
        records[index] = current.clone();

        Ok(Some(SlotUpdate::Rewritten {
            slot,
            previous,
            current,
        }))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
