use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use chrono::{
    DateTime, Datelike, MappedLocalTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::{
    CalendarError, Field, YearMonthDay, codec,
    consts::{
        DEFAULT_DELIMITER, ESFAND, FARVARDIN, MIN_DAY, MONTHS_IN_YEAR, PERSIAN_MONTH_NAMES,
        PERSIAN_WEEKDAY_NAMES, TIME_SEPARATOR_WORD,
    },
    convert::{is_persian_leap_year, persian_days_in_month, persian_from_gregorian, persian_to_gregorian},
};

/// A Persian calendar view of an absolute instant.
///
/// The Persian year, month and day are derived from the instant (in its own time zone)
/// whenever a value is built, so they can never drift apart. Every operation returns a
/// new value instead of mutating in place.
///
/// Equality, ordering and hashing consider the instant only, like [`DateTime`].
#[derive(Debug, Clone)]
pub struct PersianDate {
    instant:   DateTime<Tz>,
    year:      i32,
    month:     u8,
    day:       u8,
    delimiter: String,
}

impl PersianDate {
    /// Derives the Persian fields from the local calendar date of `instant`.
    // chrono keeps years within ±262_143, far inside i32. Floor division keeps the
    // converter's month in 0..12 and day in 1..=31 on both sides of 1 Farvardin 979.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn build(instant: DateTime<Tz>, delimiter: String) -> Self {
        let local = instant.date_naive();
        let (year, month, day) = persian_from_gregorian(
            i64::from(local.year()),
            i64::from(local.month0()),
            i64::from(local.day()),
        );
        Self {
            instant,
            year: year as i32,
            month: month as u8 + FARVARDIN,
            day: day as u8,
            delimiter,
        }
    }

    fn rebuild(&self, instant: DateTime<Tz>) -> Self {
        Self::build(instant, self.delimiter.clone())
    }

    /// The current instant in the host time zone.
    pub fn now() -> Self {
        Self::now_in(system_time_zone())
    }

    /// The current instant in the given time zone.
    pub fn now_in(tz: Tz) -> Self {
        Self::from_datetime(Utc::now().with_timezone(&tz))
    }

    pub fn from_datetime(instant: DateTime<Tz>) -> Self {
        Self::build(instant, DEFAULT_DELIMITER.to_owned())
    }

    /// Creates a date from milliseconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns `CalendarError::TimestampOutOfRange` if chrono cannot represent the instant.
    pub fn from_timestamp_millis(millis: i64, tz: Tz) -> Result<Self, CalendarError> {
        let instant = tz
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(CalendarError::TimestampOutOfRange(millis))?;
        Ok(Self::from_datetime(instant))
    }

    /// Creates a date at local midnight of the given Persian day.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` or `CalendarError::InvalidDay` for a date that
    /// does not exist in the Persian calendar, and `CalendarError::DateOutOfRange` if the
    /// Gregorian equivalent cannot be represented.
    pub fn from_persian_ymd(year: i32, month: i32, day: i32, tz: Tz) -> Result<Self, CalendarError> {
        let date = gregorian_date(year, month, day)?;
        Ok(Self::from_datetime(resolve_local(tz, date.and_time(NaiveTime::MIN))))
    }

    /// Moves to the given Persian day, keeping the local time of day.
    ///
    /// # Errors
    /// Same as [`Self::from_persian_ymd`].
    pub fn with_persian_date(&self, year: i32, month: i32, day: i32) -> Result<Self, CalendarError> {
        let date = gregorian_date(year, month, day)?;
        let local = date.and_time(self.instant.time());
        Ok(self.rebuild(resolve_local(self.time_zone(), local)))
    }

    /// Moves to another instant, keeping the time zone and delimiter.
    ///
    /// # Errors
    /// Returns `CalendarError::TimestampOutOfRange` if chrono cannot represent the instant.
    pub fn with_timestamp_millis(&self, millis: i64) -> Result<Self, CalendarError> {
        let instant = self
            .time_zone()
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(CalendarError::TimestampOutOfRange(millis))?;
        Ok(self.rebuild(instant))
    }

    /// Views the same instant from another time zone. The Persian day may change.
    pub fn with_time_zone(&self, tz: Tz) -> Self {
        self.rebuild(self.instant.with_timezone(&tz))
    }

    /// Sets a Gregorian calendar or clock field of the local wall-clock time.
    ///
    /// `Month` is 1-based here. Supported fields are `Year`, `Month`, `DayOfMonth`,
    /// `DayOfYear`, `HourOfDay`, `Minute`, `Second` and `Millisecond`.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for any other field and
    /// `CalendarError::FieldOutOfRange` if the value does not produce a valid date or time.
    pub fn with_field(&self, field: Field, value: i32) -> Result<Self, CalendarError> {
        let local = self.instant.naive_local();
        let unsigned = u32::try_from(value).ok();

        let updated = match field {
            Field::Year => local.with_year(value),
            Field::Month => unsigned.and_then(|v| local.with_month(v)),
            Field::DayOfMonth => unsigned.and_then(|v| local.with_day(v)),
            Field::DayOfYear => unsigned.and_then(|v| local.with_ordinal(v)),
            Field::HourOfDay => unsigned.and_then(|v| local.with_hour(v)),
            Field::Minute => unsigned.and_then(|v| local.with_minute(v)),
            Field::Second => unsigned.and_then(|v| local.with_second(v)),
            Field::Millisecond => unsigned
                .filter(|v| *v < 1_000)
                .and_then(|v| local.with_nanosecond(v * 1_000_000)),
            _ => {
                tracing::debug!(%field, value, "field cannot be set");
                return Err(CalendarError::UnsupportedField(field));
            },
        };

        let local = updated.ok_or(CalendarError::FieldOutOfRange { field, value })?;
        Ok(self.rebuild(resolve_local(self.time_zone(), local)))
    }

    /// Returns a copy using `delimiter` for short dates and parsing.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Adds `amount` units of `field`.
    ///
    /// `Year` and `Month` move through the Persian calendar. The day is clamped to the
    /// last day of the target month, so 31 Shahrivar plus one month is 30 Mehr. Day and
    /// week fields move the local date and keep the time of day. Clock fields move the
    /// instant itself.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for `Era`, `ZoneOffset` and `DstOffset`,
    /// and a range error if the result cannot be represented.
    pub fn add_persian_date(&self, field: Field, amount: i32) -> Result<Self, CalendarError> {
        tracing::trace!(%field, amount, date = %self, "adding to persian date");
        if amount == 0 {
            return Ok(self.clone());
        }

        let amount_64 = i64::from(amount);
        match field {
            Field::Year => self.shift_months(amount_64 * i64::from(MONTHS_IN_YEAR)),
            Field::Month => self.shift_months(amount_64),
            Field::DayOfMonth | Field::DayOfYear | Field::DayOfWeek => {
                self.shift_local(TimeDelta::days(amount_64), field, amount)
            },
            Field::WeekOfYear | Field::WeekOfMonth | Field::DayOfWeekInMonth => {
                self.shift_local(TimeDelta::weeks(amount_64), field, amount)
            },
            Field::AmPm => self.shift_instant(TimeDelta::hours(12 * amount_64), field, amount),
            Field::Hour | Field::HourOfDay => {
                self.shift_instant(TimeDelta::hours(amount_64), field, amount)
            },
            Field::Minute => self.shift_instant(TimeDelta::minutes(amount_64), field, amount),
            Field::Second => self.shift_instant(TimeDelta::seconds(amount_64), field, amount),
            Field::Millisecond => {
                self.shift_instant(TimeDelta::milliseconds(amount_64), field, amount)
            },
            Field::Era | Field::ZoneOffset | Field::DstOffset => {
                tracing::debug!(%field, amount, "field cannot be added to");
                Err(CalendarError::UnsupportedField(field))
            },
        }
    }

    // month index is always in 0..12 after rem_euclid
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn shift_months(&self, months: i64) -> Result<Self, CalendarError> {
        let months_in_year = i64::from(MONTHS_IN_YEAR);
        let total = i64::from(self.month - FARVARDIN) + months;

        let year = i64::from(self.year) + total.div_euclid(months_in_year);
        let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange(year))?;
        let month = total.rem_euclid(months_in_year) as u8 + FARVARDIN;
        let day = self.day.min(persian_days_in_month(year, month));

        self.with_persian_date(year, i32::from(month), i32::from(day))
    }

    fn shift_local(&self, delta: TimeDelta, field: Field, amount: i32) -> Result<Self, CalendarError> {
        let local = self
            .instant
            .naive_local()
            .checked_add_signed(delta)
            .ok_or(CalendarError::FieldOutOfRange { field, value: amount })?;
        Ok(self.rebuild(resolve_local(self.time_zone(), local)))
    }

    fn shift_instant(&self, delta: TimeDelta, field: Field, amount: i32) -> Result<Self, CalendarError> {
        let instant = self
            .instant
            .checked_add_signed(delta)
            .ok_or(CalendarError::FieldOutOfRange { field, value: amount })?;
        Ok(self.rebuild(instant))
    }

    /// Parses `text` with this date's delimiter and moves to that Persian day, keeping the
    /// local time of day.
    ///
    /// # Errors
    /// Returns `CalendarError::Parse` if the text is not three delimited integers, or any
    /// error of [`Self::with_persian_date`].
    pub fn parse(&self, text: &str) -> Result<Self, CalendarError> {
        let (year, month, day) = codec::parse(text, &self.delimiter)?;
        self.with_persian_date(year, month, day)
    }
}

impl PersianDate {
    pub const fn persian_year(&self) -> i32 {
        self.year
    }

    /// Persian month, 1 (Farvardin) to 12 (Esfand)
    pub const fn persian_month(&self) -> u8 {
        self.month
    }

    pub const fn persian_day(&self) -> u8 {
        self.day
    }

    /// The Persian day as a converter triple (0-indexed month)
    pub fn persian_ymd(&self) -> YearMonthDay {
        YearMonthDay::new(
            self.year,
            i32::from(self.month - FARVARDIN),
            i32::from(self.day),
        )
    }

    pub fn persian_month_name(&self) -> &'static str {
        PERSIAN_MONTH_NAMES[usize::from(self.month - FARVARDIN)]
    }

    /// Name of the local weekday, Saturday being the first day of the week
    pub fn persian_weekday_name(&self) -> &'static str {
        let from_saturday = (self.instant.weekday().num_days_from_monday() + 2) % 7;
        PERSIAN_WEEKDAY_NAMES[from_saturday as usize]
    }

    pub fn is_persian_leap_year(&self) -> bool {
        is_persian_leap_year(self.year)
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn time_zone(&self) -> Tz {
        self.instant.timezone()
    }

    pub const fn datetime(&self) -> &DateTime<Tz> {
        &self.instant
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn hour(&self) -> u32 {
        self.instant.hour()
    }

    pub fn minute(&self) -> u32 {
        self.instant.minute()
    }

    pub fn second(&self) -> u32 {
        self.instant.second()
    }

    /// `YYYY/MM/DD` using the configured delimiter, each field padded to two digits
    pub fn persian_short_date(&self) -> String {
        let d = &self.delimiter;
        format!("{:02}{d}{:02}{d}{:02}", self.year, self.month, self.day)
    }

    /// Weekday, day, month name and year, e.g. `شنبه  01  خرداد  1361`
    pub fn persian_long_date(&self) -> String {
        format!(
            "{}  {:02}  {}  {}",
            self.persian_weekday_name(),
            self.day,
            self.persian_month_name(),
            self.year
        )
    }

    /// [`Self::persian_long_date`] followed by the unpadded local time
    pub fn persian_long_date_and_time(&self) -> String {
        format!(
            "{}{TIME_SEPARATOR_WORD}{}:{}:{}",
            self.persian_long_date(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl From<DateTime<Tz>> for PersianDate {
    fn from(instant: DateTime<Tz>) -> Self {
        Self::from_datetime(instant)
    }
}

/// Parses a `YYYY/MM/DD` Persian date at midnight UTC.
impl FromStr for PersianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = codec::parse(s, DEFAULT_DELIMITER)?;
        Self::from_persian_ymd(year, month, day, Tz::UTC)
    }
}

impl fmt::Display for PersianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.persian_short_date())
    }
}

impl PartialEq for PersianDate {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for PersianDate {}

impl PartialOrd for PersianDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PersianDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for PersianDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

/// The host's IANA time zone, or UTC if it cannot be determined.
pub fn system_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(zone = %name, "unknown host time zone, using UTC");
            Tz::UTC
        }),
        Err(error) => {
            tracing::warn!(%error, "cannot read host time zone, using UTC");
            Tz::UTC
        },
    }
}

/// Validates a 1-indexed Persian date and returns its Gregorian equivalent.
#[allow(clippy::cast_sign_loss)]
fn gregorian_date(year: i32, month: i32, day: i32) -> Result<NaiveDate, CalendarError> {
    let persian_month = u8::try_from(month)
        .ok()
        .filter(|m| (FARVARDIN..=ESFAND).contains(m))
        .ok_or(CalendarError::InvalidMonth(month))?;
    let max_day = persian_days_in_month(year, persian_month);
    if !(i32::from(MIN_DAY)..=i32::from(max_day)).contains(&day) {
        return Err(CalendarError::InvalidDay { year, month, day });
    }

    let gregorian = persian_to_gregorian(YearMonthDay::new(year, month - 1, day))?;
    // month is 0..12 and day 1..=31 on success
    NaiveDate::from_ymd_opt(
        gregorian.year,
        (gregorian.month + 1) as u32,
        gregorian.day as u32,
    )
    .ok_or(CalendarError::DateOutOfRange {
        year:  gregorian.year,
        month: gregorian.month + 1,
        day:   gregorian.day,
    })
}

/// Maps a local wall-clock time to an instant.
///
/// Ambiguous times take the earlier instant. Times skipped by a forward transition are
/// read with the offset in force before the gap, which lands after it.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        MappedLocalTime::Single(instant) => instant,
        MappedLocalTime::Ambiguous(earliest, _) => earliest,
        MappedLocalTime::None => {
            let before_gap = tz.offset_from_utc_datetime(&(local - TimeDelta::days(1))).fix();
            let utc = local - TimeDelta::seconds(i64::from(before_gap.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        },
    }
}
