use rust_decimal::Decimal;

/// The operator input stream ended before a valid answer was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operator input closed")]
pub struct InputClosed;

/// Re-prompting input validators supplied by the surrounding terminal layer.
///
/// Implementations keep asking until the answer satisfies the stated constraint,
/// so the lifecycle service never sees an invalid value.
pub trait OperatorConsole {
    /// A whole number greater than zero.
    fn positive_int(&mut self, prompt: &str) -> Result<u32, InputClosed>;

    /// A non-negative amount with at most two fractional digits. Zero is allowed
    /// because it is how the operator cancels a payment.
    fn amount(&mut self, prompt: &str) -> Result<Decimal, InputClosed>;

    /// Non-empty text of at most `max_len` bytes.
    fn text(&mut self, prompt: &str, max_len: usize) -> Result<String, InputClosed>;

    fn notify(&mut self, message: &str);
}
