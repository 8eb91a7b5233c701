//! Line-oriented console I/O, generic so the drivers run against in-memory buffers in tests.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

/// Reasons a bounded number prompt rejects a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundedInputError {
    NotANumber(String),
    OutOfRange { value: i64, min: usize, max: usize },
}

impl fmt::Display for BoundedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundedInputError::NotANumber(raw) => write!(f, "{raw:?} is not a number"),
            BoundedInputError::OutOfRange { value, min, max } => {
                write!(f, "{value} is out of range, enter {min}-{max}")
            }
        }
    }
}

impl std::error::Error for BoundedInputError {}

/// Parse a whole number inside `bounds`.
///
/// # Errors
///
/// Returns `BoundedInputError` for non-numeric or out-of-range input.
pub fn parse_bounded(raw: &str, bounds: &RangeInclusive<usize>) -> Result<usize, BoundedInputError> {
    let raw = raw.trim();
    let value: i64 = raw
        .parse()
        .map_err(|_| BoundedInputError::NotANumber(raw.to_owned()))?;
    usize::try_from(value)
        .ok()
        .filter(|n| bounds.contains(n))
        .ok_or(BoundedInputError::OutOfRange {
            value,
            min: *bounds.start(),
            max: *bounds.end(),
        })
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its line ending, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print `message` without a newline and read the answer.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask until the answer is a number inside `bounds`; `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures.
    pub fn prompt_in_range(
        &mut self,
        message: &str,
        bounds: &RangeInclusive<usize>,
    ) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse_bounded(&line, bounds) {
                Ok(n) => return Ok(Some(n)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Show a numbered list and return the 0-based index picked.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures.
    pub fn choose(&mut self, heading: &str, items: &[String]) -> io::Result<Option<usize>> {
        writeln!(self.output, "{heading}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {}. {item}", i + 1)?;
        }
        let picked = self.prompt_in_range("> ", &(1..=items.len()))?;
        Ok(picked.map(|n| n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parse_bounded_reports_reasons() {
        assert_eq!(parse_bounded(" 3 ", &(1..=5)), Ok(3));
        assert_eq!(
            parse_bounded("x", &(1..=5)),
            Err(BoundedInputError::NotANumber("x".into()))
        );
        assert_eq!(
            parse_bounded("-1", &(1..=5)),
            Err(BoundedInputError::OutOfRange {
                value: -1,
                min: 1,
                max: 5
            })
        );
    }

    #[test]
    fn prompt_in_range_reprompts_until_valid() {
        let mut c = console("abc\n9\n2\n");
        assert_eq!(c.prompt_in_range("count? ", &(1..=3)).unwrap(), Some(2));
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("count? ").count(), 3);
        assert!(out.contains("\"abc\" is not a number"));
        assert!(out.contains("9 is out of range, enter 1-3"));
    }

    #[test]
    fn end_of_input_is_none() {
        let mut c = console("");
        assert_eq!(c.prompt_in_range("? ", &(1..=3)).unwrap(), None);
        assert_eq!(c.read_line().unwrap(), None);
    }

    #[test]
    fn read_line_strips_crlf_but_keeps_blank_lines() {
        let mut c = console("a\r\n\nb");
        assert_eq!(c.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(c.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(c.read_line().unwrap().as_deref(), Some("b"));
        assert_eq!(c.read_line().unwrap(), None);
    }

    #[test]
    fn choose_returns_zero_based_index() {
        let mut c = console("2\n");
        let items = vec!["A".to_string(), "B".to_string()];
        assert_eq!(c.choose("Pick:", &items).unwrap(), Some(1));
    }
}
