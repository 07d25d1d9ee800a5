//! Parsing and validation of user-entered values.
//!
//! Values are checked here, before they reach the amortization functions,
//! which assume well-formed input.

use crate::error::{RepayError, Result};
use crate::money::Money;
use crate::report::Palette;
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub use crate::amortization::{MAX_PRINCIPAL, MAX_RATE_PERCENT, MAX_TERM_YEARS};

fn parse_amount(field: &'static str, input: &str) -> Result<f64> {
    let amount = Money::from_str(input)
        .map_err(|_| RepayError::invalid(field, format!("'{}' is not a number", input.trim())))?;
    if amount.is_negative() || amount.is_zero() {
        return Err(RepayError::invalid(field, "must be greater than zero"));
    }
    let amount = amount.to_f64();
    if amount > MAX_PRINCIPAL {
        let limit = Money::from_f64(MAX_PRINCIPAL).unwrap_or_default();
        return Err(RepayError::invalid(field, format!("must not exceed {}", limit)));
    }
    Ok(amount)
}

/// Parses a loan amount. Accepts a leading `£` and comma separators.
pub fn parse_principal(input: &str) -> Result<f64> {
    parse_amount("loan amount", input)
}

/// Parses an extra monthly payment amount.
pub fn parse_extra_payment(input: &str) -> Result<f64> {
    parse_amount("extra payment", input)
}

/// Parses an annual interest rate in percent. A trailing `%` is allowed.
pub fn parse_rate(input: &str) -> Result<f64> {
    let trimmed = input.trim().trim_end_matches('%').trim_end();
    let rate = f64::from_str(trimmed).map_err(|_| {
        RepayError::invalid("interest rate", format!("'{}' is not a number", input.trim()))
    })?;

    if !rate.is_finite() {
        return Err(RepayError::invalid("interest rate", "must be a finite number"));
    }
    if rate < 0.0 {
        return Err(RepayError::invalid("interest rate", "must be zero or greater"));
    }
    if rate > MAX_RATE_PERCENT {
        return Err(RepayError::invalid(
            "interest rate",
            format!("must not exceed {}%", MAX_RATE_PERCENT),
        ));
    }
    Ok(rate)
}

/// Parses a loan term in whole years.
pub fn parse_term(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let years = u32::from_str(trimmed).map_err(|_| {
        RepayError::invalid("loan term", format!("'{}' is not a whole number of years", trimmed))
    })?;

    if years == 0 {
        return Err(RepayError::invalid("loan term", "must be at least one year"));
    }
    if years > MAX_TERM_YEARS {
        return Err(RepayError::invalid(
            "loan term",
            format!("must not exceed {} years", MAX_TERM_YEARS),
        ));
    }
    Ok(years)
}

/// Parses a yes/no answer (`yes`, `y`, `no`, `n`, any case).
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(RepayError::invalid(
            "answer",
            format!("'{}' is not yes or no", other),
        )),
    }
}

/// Line-oriented prompter that re-asks until a value parses.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W, palette: Palette) -> Self {
        Prompter {
            reader,
            writer,
            palette,
        }
    }

    /// Output stream shared with the prompts.
    pub fn out(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Writes `prompt`, reads one line and parses it with `parse`.
    ///
    /// Rejected values print the validation message and ask again. Returns
    /// [`RepayError::InputClosed`] if input ends first.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        let mut line = String::new();
        loop {
            write!(self.writer, "{}", prompt)?;
            self.writer.flush()?;

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.writer)?;
                return Err(RepayError::InputClosed);
            }

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("Rejected input {:?}: {}", line.trim(), e);
                    writeln!(
                        self.writer,
                        "{}",
                        self.palette.error(&format!("{}. Please try again.", e))
                    )?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_principal() {
        assert_eq!(parse_principal("200000").unwrap(), 200_000.0);
        assert_eq!(parse_principal(" £250,000.50 \n").unwrap(), 250_000.5);
        assert!(parse_principal("0").is_err());
        assert!(parse_principal("-100").is_err());
        assert!(parse_principal("lots").is_err());
        assert!(parse_principal("").is_err());
    }

    #[test]
    fn test_parse_principal_upper_bound() {
        assert_eq!(parse_principal("£1,000,000,000").unwrap(), MAX_PRINCIPAL);

        let err = parse_principal("1000000000.01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid loan amount: must not exceed £1,000,000,000.00"
        );
        assert!(parse_principal("70000000000000000000000000000").is_err());
        assert!(parse_extra_payment("5000000000").is_err());
    }

    #[test]
    fn test_parse_extra_payment() {
        assert_eq!(parse_extra_payment("200").unwrap(), 200.0);
        assert!(parse_extra_payment("0.00").is_err());
        assert!(parse_extra_payment("-5").is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("5").unwrap(), 5.0);
        assert_eq!(parse_rate("3.5%\n").unwrap(), 3.5);
        assert_eq!(parse_rate("0").unwrap(), 0.0);
        assert!(parse_rate("-1").is_err());
        assert!(parse_rate("101").is_err());
        assert!(parse_rate("NaN").is_err());
        assert!(parse_rate("inf").is_err());
        assert!(parse_rate("five").is_err());
    }

    #[test]
    fn test_parse_term() {
        assert_eq!(parse_term("30\n").unwrap(), 30);
        assert_eq!(parse_term("100").unwrap(), 100);
        assert!(parse_term("0").is_err());
        assert!(parse_term("101").is_err());
        assert!(parse_term("2.5").is_err());
        assert!(parse_term("-3").is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("yes").unwrap());
        assert!(parse_yes_no(" Y \n").unwrap());
        assert!(!parse_yes_no("NO").unwrap());
        assert!(!parse_yes_no("n").unwrap());
        assert!(parse_yes_no("maybe").is_err());
        assert!(parse_yes_no("").is_err());
    }

    #[test]
    fn test_prompter_reprompts_until_valid() {
        let input = Cursor::new("abc\n-5\n30\n");
        let mut output = Vec::new();
        let mut prompter = Prompter::new(input, &mut output, Palette::plain());

        let term = prompter.ask("Term: ", parse_term).unwrap();
        assert_eq!(term, 30);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Term: ").count(), 3);
        assert_eq!(text.matches("Please try again.").count(), 2);
    }

    #[test]
    fn test_prompter_reports_closed_input() {
        let input = Cursor::new("oops\n");
        let mut output = Vec::new();
        let mut prompter = Prompter::new(input, &mut output, Palette::plain());

        let result = prompter.ask("Rate: ", parse_rate);
        assert!(matches!(result, Err(RepayError::InputClosed)));
    }
}
