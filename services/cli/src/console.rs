use std::io::{self, BufRead, StdinLock, Stdout, Write};

use loan_ledger::workflows::loans::{InputClosed, OperatorConsole};
use rust_decimal::Decimal;

const AMOUNT_SCALE: u32 = 2;

/// Line-oriented operator console. Every validator re-prompts until the answer
/// fits, so only a closed input stream ever escapes as an error.
pub(crate) struct PromptConsole<R, W> {
    input: R,
    output: W,
    echo: bool,
}

impl PromptConsole<StdinLock<'static>, Stdout> {
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConsole<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo: false,
        }
    }

    /// Repeat each answer after its prompt, for scripted sessions where the
    /// input never appears on a terminal.
    pub(crate) fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> Result<String, InputClosed> {
        let _ = write!(self.output, "{prompt}: ");
        let _ = self.output.flush();

        let mut line = String::new();
        let answer = match self.input.read_line(&mut line) {
            Ok(0) => return Err(InputClosed),
            Ok(_) => line.trim().to_string(),
            // Undecodable bytes are consumed; treat the line as a bad answer.
            Err(err) if err.kind() == io::ErrorKind::InvalidData => String::new(),
            Err(_) => return Err(InputClosed),
        };

        if self.echo {
            let _ = writeln!(self.output, "{answer}");
        }
        Ok(answer)
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

impl<R: BufRead, W: Write> OperatorConsole for PromptConsole<R, W> {
    fn positive_int(&mut self, prompt: &str) -> Result<u32, InputClosed> {
        loop {
            match self.ask(prompt)?.parse::<u32>() {
                Ok(value) if value > 0 => return Ok(value),
                _ => self.say("Invalid input. Please enter a positive whole number."),
            }
        }
    }

    fn amount(&mut self, prompt: &str) -> Result<Decimal, InputClosed> {
        loop {
            match self.ask(prompt)?.parse::<Decimal>() {
                Ok(value) if !value.is_sign_negative() && value.scale() <= AMOUNT_SCALE => {
                    return Ok(value)
                }
                _ => self.say(
                    "Invalid input. Please enter a non-negative amount with at most two decimal places.",
                ),
            }
        }
    }

    fn text(&mut self, prompt: &str, max_len: usize) -> Result<String, InputClosed> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.chars().any(char::is_control) {
                self.say("Invalid input. Control characters are not allowed.");
                continue;
            }
            if !answer.is_empty() && answer.len() <= max_len {
                return Ok(answer);
            }
            self.say(&format!(
                "Invalid input. Please enter between 1 and {max_len} characters."
            ));
        }
    }

    fn notify(&mut self, message: &str) {
        self.say(message);
    }
}
