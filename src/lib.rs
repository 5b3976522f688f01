mod codec;
mod consts;
mod convert;
mod date;
mod prelude;
mod types;

pub use codec::{parse, to_latin_digits, to_latin_digits_all, to_persian_digits, to_persian_digits_all};
pub use consts::*;
pub use convert::{
    gregorian_to_persian, is_gregorian_leap_year, is_persian_leap_year, persian_days_in_month,
    persian_days_in_year, persian_to_gregorian,
};
pub use date::{PersianDate, system_time_zone};
pub use types::{Field, YearMonthDay};

/// Re-exported so callers can name time zones without a direct dependency.
pub use chrono_tz::Tz;

use crate::prelude::*;

/// Error produced when date text cannot be split into three integer fields.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Empty field delimiter")]
    EmptyDelimiter,
    #[display(fmt = "Expected {expected} date fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[display(fmt = "Invalid number: {_0}")]
    InvalidNumber(String),
}

impl std::error::Error for ParseError {}

/// Error type for conversions and date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Month outside the accepted range (1..=12 for dates, -11..=11 for the converter).
    #[error("Invalid month: {0}")]
    InvalidMonth(i32),

    /// Day that does not exist in the given Persian month.
    #[error("Invalid day {day} for month {year}/{month:02}")]
    InvalidDay { year: i32, month: i32, day: i32 },

    /// Field that the operation does not accept.
    #[error("Unsupported field: {0}")]
    UnsupportedField(Field),

    /// Field value or amount that produces no valid date or time.
    #[error("Value {value} is out of range for field {field}")]
    FieldOutOfRange { field: Field, value: i32 },

    #[error("Year {0} is out of range")]
    YearOutOfRange(i64),

    /// Gregorian date beyond what chrono can represent.
    #[error("Gregorian date {year}-{month:02}-{day:02} is out of range")]
    DateOutOfRange { year: i32, month: i32, day: i32 },

    #[error("Timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),

    /// Error parsing date text.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
