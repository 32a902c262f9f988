//! Durable fixed-slot record storage.

mod file;
pub mod layout;

pub use file::FileLoanStore;
pub use layout::{LayoutError, RECORD_SIZE};
