//! Re-prompting readers for interactive input
//!
//! A [`Prompter`] owns one input stream and one output stream for the whole
//! session. Every accessor blocks until the line it reads satisfies its
//! constraint; malformed input is answered with a message and a fresh prompt,
//! never with an error. The only errors surfaced are I/O failures, including
//! `UnexpectedEof` once the input is exhausted.

use crate::error::Result;
use chrono::NaiveDate;
use poise_common::{parse_date, parse_money};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

const BLANK_INPUT_MESSAGE: &str = "Input cannot be blank. Please try again.";
const INVALID_NUMBER_MESSAGE: &str = "Invalid input. Please enter a valid number (e.g., 150000.00).";
const INVALID_INTEGER_MESSAGE: &str = "Invalid input. Please enter a whole number.";
const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use YYYY-MM-DD.";
const INVALID_OPTIONAL_DATE_MESSAGE: &str =
    "Invalid date format. Please enter in YYYY-MM-DD format or leave blank to keep the current value.";

/// Line-oriented prompt/response channel over any reader and writer
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    buffer: Vec<u8>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buffer: Vec::new(),
        }
    }

    /// The output stream, for callers that print listings between prompts
    pub fn output(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the prompter and return its streams
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Write one line of output
    ///
    /// # Errors
    /// Returns an error if the output cannot be written
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.writer, "{}", message.as_ref())?;
        Ok(())
    }

    /// Print `prompt: ` and read one line with surrounding whitespace removed
    ///
    /// Bytes that are not valid UTF-8 become `U+FFFD`, so such a line fails
    /// the caller's own checks and is asked for again.
    ///
    /// # Errors
    /// Returns `UnexpectedEof` when the input has no more lines
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}: ")?;
        self.writer.flush()?;

        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed").into());
        }
        Ok(String::from_utf8_lossy(&self.buffer).trim().to_string())
    }

    /// Read a string, re-prompting on blank input unless `allow_blank`
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_string(&mut self, prompt: &str, allow_blank: bool) -> Result<String> {
        loop {
            let input = self.read_line(prompt)?;
            if allow_blank || !input.is_empty() {
                return Ok(input);
            }
            self.say(BLANK_INPUT_MESSAGE)?;
        }
    }

    /// Read a string where blank means "no value"
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_optional_string(&mut self, prompt: &str) -> Result<Option<String>> {
        let input = self.read_string(prompt, true)?;
        Ok((!input.is_empty()).then_some(input))
    }

    /// Read a decimal number; no range checks
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_decimal(&mut self, prompt: &str) -> Result<Decimal> {
        loop {
            let input = self.read_line(prompt)?;
            if let Some(value) = parse_money(&input) {
                return Ok(value);
            }
            self.say(INVALID_NUMBER_MESSAGE)?;
        }
    }

    /// Read a decimal number where blank means "no value"
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_optional_decimal(&mut self, prompt: &str) -> Result<Option<Decimal>> {
        loop {
            let input = self.read_line(prompt)?;
            if input.is_empty() {
                return Ok(None);
            }
            if let Some(value) = parse_money(&input) {
                return Ok(Some(value));
            }
            self.say(INVALID_NUMBER_MESSAGE)?;
        }
    }

    /// Read a whole number, such as a record id
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_integer(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let input = self.read_line(prompt)?;
            if let Ok(value) = input.parse::<i64>() {
                return Ok(value);
            }
            self.say(INVALID_INTEGER_MESSAGE)?;
        }
    }

    /// Read an ISO `YYYY-MM-DD` calendar date
    ///
    /// With `allow_blank`, a blank line returns `None`; otherwise the prompt
    /// repeats until the text has the right shape and names a real day.
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_date(&mut self, prompt: &str, allow_blank: bool) -> Result<Option<NaiveDate>> {
        let prompt = format!("{prompt} (YYYY-MM-DD)");
        loop {
            let input = self.read_line(&prompt)?;
            if allow_blank && input.is_empty() {
                return Ok(None);
            }
            if let Some(date) = parse_date(&input) {
                return Ok(Some(date));
            }
            self.say(if allow_blank {
                INVALID_OPTIONAL_DATE_MESSAGE
            } else {
                INVALID_DATE_MESSAGE
            })?;
        }
    }

    /// Read a date that must be supplied
    ///
    /// # Errors
    /// Returns an error only on I/O failure
    pub fn read_required_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        loop {
            if let Some(date) = self.read_date(prompt, false)? {
                return Ok(date);
            }
        }
    }
}
