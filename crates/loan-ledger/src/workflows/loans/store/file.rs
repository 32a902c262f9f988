use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::super::domain::LoanRecord;
use super::super::repository::{LoanRepository, LoanScan, SlotUpdate, StoreError};
use super::layout::{self, RECORD_SIZE};

/// Loan records in a single append-growable file of fixed-size slots.
///
/// The file is opened inside each operation and closed before it returns, so the
/// handle never outlives the call on any path.
#[derive(Debug, Clone)]
pub struct FileLoanStore {
    path: PathBuf,
}

impl FileLoanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &'static str) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}

impl LoanRepository for FileLoanStore {
    fn append(&self, record: &LoanRecord) -> Result<(), StoreError> {
        record.validate()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(self.io_error("open for append"))?;

        file.write_all(&layout::encode(record))
            .map_err(self.io_error("append to"))?;
        file.sync_data().map_err(self.io_error("sync"))?;

        debug!(
            customer = %record.customer_number,
            status = record.status.label(),
            "appended loan record"
        );
        Ok(())
    }

    fn scan(&self) -> Result<LoanScan<'_>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Box::new(std::iter::empty()));
            }
            Err(err) => return Err(self.io_error("open for reading")(err)),
        };

        Ok(Box::new(SlotReader::new(BufReader::new(file), self)))
    }

    fn find_and_update(
        &self,
        predicate: &mut dyn FnMut(&LoanRecord) -> bool,
        mutate: &mut dyn FnMut(&LoanRecord) -> Option<LoanRecord>,
    ) -> Result<Option<SlotUpdate>, StoreError> {
        let mut file = match OpenOptions::new().read(true).write(true).open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error("open for update")(err)),
        };

        let matched = {
            let reader = SlotReader::new(BufReader::new(&mut file), self);
            let mut matched = None;
            for (slot, record) in (0u64..).zip(reader) {
                let record = record?;
                if predicate(&record) {
                    matched = Some((slot, record));
                    break;
                }
            }
            matched
        };

        let Some((slot, previous)) = matched else {
            return Ok(None);
        };

        let Some(current) = mutate(&previous) else {
            return Ok(Some(SlotUpdate::Untouched {
                slot,
                record: previous,
            }));
        };
        current.validate()?;

        file.seek(SeekFrom::Start(slot * RECORD_SIZE as u64))
            .map_err(self.io_error("seek in"))?;
        file.write_all(&layout::encode(&current))
            .map_err(self.io_error("rewrite slot in"))?;
        file.sync_data().map_err(self.io_error("sync"))?;

        debug!(
            slot,
            customer = %current.customer_number,
            status = current.status.label(),
            "rewrote loan slot in place"
        );
        Ok(Some(SlotUpdate::Rewritten {
            slot,
            previous,
            current,
        }))
    }
}

/// Sequential slot decoder. Stops after the first error.
struct SlotReader<'s, R> {
    inner: R,
    store: &'s FileLoanStore,
    slot: u64,
    done: bool,
}

impl<'s, R: Read> SlotReader<'s, R> {
    fn new(inner: R, store: &'s FileLoanStore) -> Self {
        Self {
            inner,
            store,
            slot: 0,
            done: false,
        }
    }

    /// Fill one slot buffer. `Ok(0)` is a clean end of file.
    fn fill(&mut self, buf: &mut [u8; RECORD_SIZE]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for SlotReader<'_, R> {
    type Item = Result<LoanRecord, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = [0u8; RECORD_SIZE];
        let slot = self.slot;
        let result = match self.fill(&mut buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(bytes) if bytes < RECORD_SIZE => Err(StoreError::TruncatedRecord {
                slot,
                bytes,
                expected: RECORD_SIZE,
            }),
            Ok(_) => layout::decode(&buf).map_err(|source| StoreError::Layout { slot, source }),
            Err(err) => Err(self.store.io_error("read from")(err)),
        };

        self.slot += 1;
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
