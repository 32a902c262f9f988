use std::io;
use std::path::PathBuf;

use super::domain::{LoanRecord, RecordInvariantError};
use super::store::LayoutError;

/// Lazily decoded records in storage order.
pub type LoanScan<'a> = Box<dyn Iterator<Item = Result<LoanRecord, StoreError>> + 'a>;

/// Result of a `find_and_update` call that matched a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotUpdate {
    /// The mutation produced a new value and the slot was rewritten in place.
    Rewritten {
        slot: u64,
        previous: LoanRecord,
        current: LoanRecord,
    },
    /// The slot matched but the mutation declined to change it.
    Untouched { slot: u64, record: LoanRecord },
}

impl SlotUpdate {
    pub fn slot(&self) -> u64 {
        match self {
            SlotUpdate::Rewritten { slot, .. } | SlotUpdate::Untouched { slot, .. } => *slot,
        }
    }
}

/// Storage abstraction so the lifecycle service can be exercised in isolation.
///
/// Records are append-only; the only mutation is an in-place rewrite of the first
/// slot matching a predicate.
pub trait LoanRepository {
    fn append(&self, record: &LoanRecord) -> Result<(), StoreError>;

    /// Restartable scan from the first slot. A store that does not exist yet is empty.
    fn scan(&self) -> Result<LoanScan<'_>, StoreError>;

    /// Visit slots in order; on the first record accepted by `predicate` ask `mutate`
    /// for a replacement and rewrite that slot only. Returns `None` when nothing
    /// matched.
    fn find_and_update(
        &self,
        predicate: &mut dyn FnMut(&LoanRecord) -> bool,
        mutate: &mut dyn FnMut(&LoanRecord) -> Option<LoanRecord>,
    ) -> Result<Option<SlotUpdate>, StoreError>;

    fn find_first(
        &self,
        predicate: &mut dyn FnMut(&LoanRecord) -> bool,
    ) -> Result<Option<LoanRecord>, StoreError> {
        for record in self.scan()? {
            let record = record?;
            if predicate(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn load_all(&self) -> Result<Vec<LoanRecord>, StoreError> {
        self.scan()?.collect()
    }
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unable to {operation} loan store {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("slot {slot} holds an unreadable record: {source}")]
    Layout {
        slot: u64,
        #[source]
        source: LayoutError,
    },
    #[error("slot {slot} is truncated ({bytes} of {expected} bytes)")]
    TruncatedRecord {
        slot: u64,
        bytes: usize,
        expected: usize,
    },
    #[error("refusing to persist invalid record: {0}")]
    InvalidRecord(#[from] RecordInvariantError),
}
