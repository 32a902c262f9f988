//! Fixed-width binary encoding of a [`LoanRecord`].
//!
//! Every record occupies exactly [`RECORD_SIZE`] bytes, little-endian, with text
//! fields NUL padded to their declared width. Slot `i` therefore starts at
//! `i * RECORD_SIZE`, which is what makes in-place rewrites possible.

use rust_decimal::Decimal;

use super::super::domain::{CustomerNumber, LoanPurpose, LoanRecord, LoanStatus, MAX_PURPOSE_LEN};

const U32_WIDTH: usize = 4;
const DECIMAL_WIDTH: usize = 16;
pub const PURPOSE_WIDTH: usize = MAX_PURPOSE_LEN;
pub const STATUS_WIDTH: usize = 12;

pub const RECORD_SIZE: usize = U32_WIDTH
    + PURPOSE_WIDTH
    + DECIMAL_WIDTH
    + U32_WIDTH
    + DECIMAL_WIDTH
    + U32_WIDTH
    + DECIMAL_WIDTH
    + DECIMAL_WIDTH
    + STATUS_WIDTH;

/// Decoding failures for a single slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("purpose field is not valid UTF-8")]
    InvalidPurpose,
    #[error("unknown status label {0:?}")]
    UnknownStatus(String),
}

pub fn encode(record: &LoanRecord) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    let mut writer = SlotWriter { buf: &mut buf, at: 0 };

    writer.put_u32(record.customer_number.0);
    writer.put_text(record.purpose.as_str(), PURPOSE_WIDTH);
    writer.put_decimal(record.loan_amount);
    writer.put_u32(record.repayment_months);
    writer.put_decimal(record.interest_rate);
    writer.put_u32(record.credit_score);
    writer.put_decimal(record.monthly_installment);
    writer.put_decimal(record.remaining_amount);
    writer.put_text(record.status.label(), STATUS_WIDTH);

    buf
}

pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Result<LoanRecord, LayoutError> {
    let mut reader = SlotReader { buf: bytes, at: 0 };

    let customer_number = CustomerNumber(reader.take_u32());
    let purpose = reader
        .take_text(PURPOSE_WIDTH)
        .ok_or(LayoutError::InvalidPurpose)?;
    let loan_amount = reader.take_decimal();
    let repayment_months = reader.take_u32();
    let interest_rate = reader.take_decimal();
    let credit_score = reader.take_u32();
    let monthly_installment = reader.take_decimal();
    let remaining_amount = reader.take_decimal();
    let status_label = reader.take_text(STATUS_WIDTH).unwrap_or_default();
    let status = LoanStatus::from_label(&status_label)
        .ok_or(LayoutError::UnknownStatus(status_label))?;

    Ok(LoanRecord {
        customer_number,
        purpose: LoanPurpose::new(&purpose),
        loan_amount,
        repayment_months,
        interest_rate,
        credit_score,
        monthly_installment,
        remaining_amount,
        status,
    })
}

struct SlotWriter<'a> {
    buf: &'a mut [u8; RECORD_SIZE],
    at: usize,
}

impl SlotWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.at..self.at + bytes.len()].copy_from_slice(bytes);
        self.at += bytes.len();
    }

    fn put_u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    fn put_decimal(&mut self, value: Decimal) {
        self.put(&value.serialize());
    }

    /// Copy up to `width` bytes and leave the remainder zeroed.
    fn put_text(&mut self, value: &str, width: usize) {
        let bytes = value.as_bytes();
        let len = bytes.len().min(width);
        self.buf[self.at..self.at + len].copy_from_slice(&bytes[..len]);
        self.at += width;
    }
}

struct SlotReader<'a> {
    buf: &'a [u8; RECORD_SIZE],
    at: usize,
}

impl SlotReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.at..self.at + N]);
        self.at += N;
        out
    }

    fn take_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take::<U32_WIDTH>())
    }

    fn take_decimal(&mut self) -> Decimal {
        Decimal::deserialize(self.take::<DECIMAL_WIDTH>())
    }

    fn take_text(&mut self, width: usize) -> Option<String> {
        let field = &self.buf[self.at..self.at + width];
        self.at += width;
        let end = field.iter().position(|byte| *byte == 0).unwrap_or(width);
        std::str::from_utf8(&field[..end]).ok().map(str::to_string)
    }
}
