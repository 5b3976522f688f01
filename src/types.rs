use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A raw year, month and day triple used as the converter's input and output.
///
/// The month is 0-indexed (0 is January or Farvardin). No field is validated here:
/// the conversion functions check the month and leave the day to the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[display(fmt = "{year}/{month}/{day}")]
pub struct YearMonthDay {
    pub year:  i32,
    pub month: i32,
    pub day:   i32,
}

impl YearMonthDay {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }
}

/// Calendar field identifiers accepted by [`crate::PersianDate::add_persian_date`]
/// and [`crate::PersianDate::with_field`].
///
/// `Year` and `Month` act on the Persian calendar when adding. Every other field acts on
/// the underlying instant or its local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Era,
    Year,
    Month,
    WeekOfYear,
    WeekOfMonth,
    DayOfMonth,
    DayOfYear,
    DayOfWeek,
    DayOfWeekInMonth,
    AmPm,
    Hour,
    HourOfDay,
    Minute,
    Second,
    Millisecond,
    ZoneOffset,
    DstOffset,
}
