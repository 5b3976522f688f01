//! Digit localization and delimiter-based date parsing.

use crate::ParseError;
use crate::consts::{ARABIC_INDIC_DIGITS, PERSIAN_DIGITS};

/// Number of fields in a delimited date: year, month and day.
const DATE_FIELD_COUNT: usize = 3;

/// Replaces every ASCII digit with its Persian-script counterpart.
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Replaces every Persian (or Arabic-Indic) digit with its ASCII counterpart.
pub fn to_latin_digits(text: &str) -> String {
    text.chars().map(latin_digit).collect()
}

/// Applies [`to_persian_digits`] to each string of a sequence, keeping the order.
pub fn to_persian_digits_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| to_persian_digits(s.as_ref()))
        .collect()
}

/// Applies [`to_latin_digits`] to each string of a sequence, keeping the order.
pub fn to_latin_digits_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| to_latin_digits(s.as_ref()))
        .collect()
}

fn latin_digit(c: char) -> char {
    PERSIAN_DIGITS
        .iter()
        .position(|p| *p == c)
        .or_else(|| ARABIC_INDIC_DIGITS.iter().position(|a| *a == c))
        .map_or(c, |d| char::from(b'0' + d as u8))
}

/// Splits `text` on `delimiter` into a (year, month, day) triple.
///
/// Fields may be written with Latin or Persian digits and may be padded with whitespace.
/// Values are not range-checked here.
///
/// # Errors
/// Returns `ParseError::EmptyInput` for blank text, `ParseError::EmptyDelimiter` for an
/// empty delimiter, `ParseError::FieldCount` unless there are exactly three fields, and
/// `ParseError::InvalidNumber` if a field is not an integer.
pub fn parse(text: &str, delimiter: &str) -> Result<(i32, i32, i32), ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if delimiter.is_empty() {
        return Err(ParseError::EmptyDelimiter);
    }

    let normalized = to_latin_digits(trimmed);
    let parts: Vec<&str> = normalized.split(delimiter).map(str::trim).collect();
    if parts.len() != DATE_FIELD_COUNT {
        tracing::trace!(text, delimiter, found = parts.len(), "wrong number of date fields");
        return Err(ParseError::FieldCount {
            expected: DATE_FIELD_COUNT,
            found:    parts.len(),
        });
    }

    let year = parse_i32(parts[0])?;
    let month = parse_i32(parts[1])?;
    let day = parse_i32(parts[2])?;
    Ok((year, month, day))
}

/// Helper to parse i32 with better error messages
fn parse_i32(s: &str) -> Result<i32, ParseError> {
    s.parse::<i32>().map_err(|_| {
        tracing::trace!(field = s, "date field is not an integer");
        ParseError::InvalidNumber(s.to_owned())
    })
}
