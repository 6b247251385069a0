//! Line-oriented terminal I/O and input parsing.

use std::io::{BufRead, Write};

use warehouse_core::{Money, Quantity};

use crate::error::{InputError, ShellError};

/// Prompted, line-at-a-time terminal.
///
/// Generic over the streams so the whole shell can be driven from a script
/// in tests.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), ShellError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Show `prompt` (no newline) and read one trimmed line.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ShellError> {
        Ok(self.ask_raw(prompt)?.trim().to_string())
    }

    /// Like [`Console::ask`], but only the line terminator is removed.
    pub fn ask_raw(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        let end = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(end);
        Ok(line)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Signed, finite amount or unit price.
pub fn parse_amount(text: &str) -> Result<Money, InputError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Money::new(value)),
        _ => Err(InputError::InvalidAmount(text.to_string())),
    }
}

/// Whole number of units, zero or more.
pub fn parse_quantity(text: &str) -> Result<Quantity, InputError> {
    let invalid = || InputError::InvalidQuantity(text.to_string());
    let value = text.trim().parse::<i64>().map_err(|_| invalid())?;
    Quantity::try_from(value).map_err(|_| invalid())
}

/// Optional log index: an empty answer means "use the default bound".
///
/// Surrounding whitespace is ignored around a number, but an answer made only
/// of whitespace is malformed. Negative values parse fine; range checks happen
/// in the domain.
pub fn parse_index(text: &str) -> Result<Option<i64>, InputError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| InputError::InvalidIndex(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_writes_prompt_and_trims_answer() {
        let mut out = Vec::new();
        let mut console = Console::new(Cursor::new("  widget \n"), &mut out);

        assert_eq!(console.ask("Enter product name: ").unwrap(), "widget");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter product name: ");
    }

    #[test]
    fn ask_reports_end_of_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert!(matches!(console.ask("> "), Err(ShellError::EndOfInput)));
    }

    #[test]
    fn ask_raw_keeps_inner_whitespace() {
        let mut console = Console::new(Cursor::new("  \r\n\n"), Vec::new());
        assert_eq!(console.ask_raw("> ").unwrap(), "  ");
        assert_eq!(console.ask_raw("> ").unwrap(), "");
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut console = Console::new(Cursor::new("end"), Vec::new());
        assert_eq!(console.ask("> ").unwrap(), "end");
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("100"), Ok(Money::new(100.0)));
        assert_eq!(parse_amount(" -2.5 "), Ok(Money::new(-2.5)));
        assert_eq!(parse_amount("1e3"), Ok(Money::new(1000.0)));
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("nan").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn quantities() {
        assert_eq!(parse_quantity("10"), Ok(10));
        assert_eq!(parse_quantity("0"), Ok(0));
        assert_eq!(
            parse_quantity("-3"),
            Err(InputError::InvalidQuantity("-3".to_string()))
        );
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn indices() {
        assert_eq!(parse_index(""), Ok(None));
        assert_eq!(
            parse_index("   "),
            Err(InputError::InvalidIndex("   ".to_string()))
        );
        assert_eq!(parse_index("3"), Ok(Some(3)));
        assert_eq!(parse_index(" 3 "), Ok(Some(3)));
        assert_eq!(parse_index("-1"), Ok(Some(-1)));
        assert_eq!(
            parse_index("x"),
            Err(InputError::InvalidIndex("x".to_string()))
        );
    }
}
