//! Gregorian ↔ Persian conversion.
//!
//! Both directions count days from 1 January 1600 (the first day of a 400-year Gregorian
//! cycle), which falls 79 days before 1 Farvardin 979. Years are then decomposed with
//! floor division, so dates before that epoch follow the same cycles backwards.

use crate::CalendarError;
use crate::consts::{
    CENTURY_CYCLE, CENTURY_DAYS, COMMON_YEAR_DAYS, ESFAND, ESFAND_DAYS_LEAP, FOUR_YEAR_DAYS,
    GREGORIAN_BASE_YEAR, GREGORIAN_CYCLE, GREGORIAN_CYCLE_DAYS, GREGORIAN_DAYS_IN_MONTH,
    LEAP_CENTURY_DAYS, LEAP_YEAR_CYCLE, NOWRUZ_OFFSET_DAYS, PERSIAN_BASE_YEAR,
    PERSIAN_CYCLE_DAYS, PERSIAN_CYCLE_LEAPS, PERSIAN_CYCLE_YEARS, PERSIAN_DAYS_IN_MONTH,
};
use crate::types::YearMonthDay;

/// Largest accepted absolute month index (months are 0-indexed).
const MAX_MONTH_INDEX: i32 = 11;

/// Last month index reached while walking a month table; the final month takes the rest.
const LAST_MONTH_INDEX: usize = 11;

/// Converts a Gregorian date to the Persian calendar.
///
/// Both the input and the output month are 0-indexed.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if the month is outside `-11..=11`, or
/// `CalendarError::YearOutOfRange` if the resulting year does not fit an `i32`.
pub fn gregorian_to_persian(gregorian: YearMonthDay) -> Result<YearMonthDay, CalendarError> {
    check_month(gregorian.month)?;
    let (year, month, day) = persian_from_gregorian(
        i64::from(gregorian.year),
        i64::from(gregorian.month),
        i64::from(gregorian.day),
    );
    narrow(year, month, day)
}

/// Converts a Persian date to the Gregorian calendar.
///
/// Both the input and the output month are 0-indexed.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if the month is outside `-11..=11`, or
/// `CalendarError::YearOutOfRange` if the resulting year does not fit an `i32`.
pub fn persian_to_gregorian(persian: YearMonthDay) -> Result<YearMonthDay, CalendarError> {
    check_month(persian.month)?;
    let (year, month, day) = gregorian_from_persian(
        i64::from(persian.year),
        i64::from(persian.month),
        i64::from(persian.day),
    );
    narrow(year, month, day)
}

/// Whether a Persian year is leap (Esfand has 30 days).
///
/// Follows the 33-year cycle the converter is built on: counting from 979, the years at
/// positions 0, 4, 8, ..., 28 of each cycle are leap.
pub fn is_persian_leap_year(year: i32) -> bool {
    let position = (i64::from(year) - PERSIAN_BASE_YEAR).rem_euclid(PERSIAN_CYCLE_YEARS);
    position % LEAP_YEAR_CYCLE == 0 && position < PERSIAN_CYCLE_YEARS - 1
}

pub fn is_gregorian_leap_year(year: i32) -> bool {
    is_gregorian_leap(i64::from(year))
}

/// Number of days in a Persian month (1-indexed).
pub fn persian_days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= ESFAND);

    match month {
        1..=6 => 31,
        7..=11 => 30,
        _ if is_persian_leap_year(year) => ESFAND_DAYS_LEAP,
        _ => ESFAND_DAYS_LEAP - 1,
    }
}

/// Number of days in a Persian year.
pub fn persian_days_in_year(year: i32) -> u16 {
    if is_persian_leap_year(year) { 366 } else { 365 }
}

fn check_month(month: i32) -> Result<(), CalendarError> {
    if (-MAX_MONTH_INDEX..=MAX_MONTH_INDEX).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonth(month))
    }
}

// Month and day always land in 0..12 and 1..=31 here, only the year can overflow.
#[allow(clippy::cast_possible_truncation)]
fn narrow(year: i64, month: i64, day: i64) -> Result<YearMonthDay, CalendarError> {
    let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange(year))?;
    Ok(YearMonthDay::new(year, month as i32, day as i32))
}

const fn is_gregorian_leap(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || year % GREGORIAN_CYCLE == 0
}

/// Sum of the first `months` entries of a month-length table.
fn days_before_month(table: &[i64; 12], months: i64) -> i64 {
    let months = usize::try_from(months).unwrap_or(0);
    table.iter().take(months).sum()
}

/// Gregorian (year, 0-indexed month, day) to Persian, without range checks.
pub(crate) fn persian_from_gregorian(year: i64, month: i64, day: i64) -> (i64, i64, i64) {
    let year = year - GREGORIAN_BASE_YEAR;

    let mut day_no = COMMON_YEAR_DAYS * year + (year + 3).div_euclid(LEAP_YEAR_CYCLE)
        - (year + 99).div_euclid(CENTURY_CYCLE)
        + (year + 399).div_euclid(GREGORIAN_CYCLE);
    day_no += days_before_month(&GREGORIAN_DAYS_IN_MONTH, month);
    if month > 1 && is_gregorian_leap(year) {
        day_no += 1;
    }
    day_no += day - 1;

    let mut day_no = day_no - NOWRUZ_OFFSET_DAYS;

    let cycles = day_no.div_euclid(PERSIAN_CYCLE_DAYS);
    day_no = day_no.rem_euclid(PERSIAN_CYCLE_DAYS);

    let mut persian_year =
        PERSIAN_BASE_YEAR + PERSIAN_CYCLE_YEARS * cycles + LEAP_YEAR_CYCLE * (day_no / FOUR_YEAR_DAYS);
    day_no %= FOUR_YEAR_DAYS;

    // The first year of each four-year run is the leap one.
    if day_no > COMMON_YEAR_DAYS {
        persian_year += (day_no - 1) / COMMON_YEAR_DAYS;
        day_no = (day_no - 1) % COMMON_YEAR_DAYS;
    }

    let mut month = 0;
    while month < LAST_MONTH_INDEX && day_no >= PERSIAN_DAYS_IN_MONTH[month] {
        day_no -= PERSIAN_DAYS_IN_MONTH[month];
        month += 1;
    }

    (persian_year, month as i64, day_no + 1)
}

/// Persian (year, 0-indexed month, day) to Gregorian, without range checks.
pub(crate) fn gregorian_from_persian(year: i64, month: i64, day: i64) -> (i64, i64, i64) {
    let year = year - PERSIAN_BASE_YEAR;

    let mut day_no = COMMON_YEAR_DAYS * year
        + year.div_euclid(PERSIAN_CYCLE_YEARS) * PERSIAN_CYCLE_LEAPS
        + (year.rem_euclid(PERSIAN_CYCLE_YEARS) + 3) / LEAP_YEAR_CYCLE;
    day_no += days_before_month(&PERSIAN_DAYS_IN_MONTH, month);
    day_no += day - 1;

    let mut day_no = day_no + NOWRUZ_OFFSET_DAYS;

    let mut gregorian_year =
        GREGORIAN_BASE_YEAR + GREGORIAN_CYCLE * day_no.div_euclid(GREGORIAN_CYCLE_DAYS);
    day_no = day_no.rem_euclid(GREGORIAN_CYCLE_DAYS);

    let mut leap = true;
    if day_no >= LEAP_CENTURY_DAYS {
        day_no -= 1;
        gregorian_year += CENTURY_CYCLE * (day_no / CENTURY_DAYS);
        day_no %= CENTURY_DAYS;

        // Inside a non-leap century year the four-year runs start one day late.
        if day_no >= COMMON_YEAR_DAYS {
            day_no += 1;
        } else {
            leap = false;
        }
    }

    gregorian_year += LEAP_YEAR_CYCLE * (day_no / FOUR_YEAR_DAYS);
    day_no %= FOUR_YEAR_DAYS;

    if day_no > COMMON_YEAR_DAYS {
        leap = false;
        day_no -= 1;
        gregorian_year += day_no / COMMON_YEAR_DAYS;
        day_no %= COMMON_YEAR_DAYS;
    }

    let mut month = 0;
    while month < LAST_MONTH_INDEX {
        let length = GREGORIAN_DAYS_IN_MONTH[month] + i64::from(month == 1 && leap);
        if day_no < length {
            break;
        }
        day_no -= length;
        month += 1;
    }

    (gregorian_year, month as i64, day_no + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn ymd(year: i32, month: i32, day: i32) -> YearMonthDay {
        YearMonthDay::new(year, month, day)
    }

    #[test]
    fn test_known_conversions() {
        struct TestCase {
            gregorian:   YearMonthDay,
            persian:     YearMonthDay,
            description: &'static str,
        }

        let cases = [
            TestCase {
                gregorian:   ymd(2021, 2, 21),
                persian:     ymd(1400, 0, 1),
                description: "Nowruz 1400",
            },
            TestCase {
                gregorian:   ymd(2020, 1, 29),
                persian:     ymd(1398, 11, 10),
                description: "Gregorian leap day",
            },
            TestCase {
                gregorian:   ymd(1970, 0, 1),
                persian:     ymd(1348, 9, 11),
                description: "Unix epoch",
            },
            TestCase {
                gregorian:   ymd(2025, 4, 3),
                persian:     ymd(1404, 1, 13),
                description: "mid Ordibehesht",
            },
            TestCase {
                gregorian:   ymd(2021, 2, 20),
                persian:     ymd(1399, 11, 30),
                description: "Esfand 30 of a leap year",
            },
            TestCase {
                gregorian:   ymd(2000, 2, 1),
                persian:     ymd(1378, 11, 11),
                description: "March in a 400-divisible year",
            },
            TestCase {
                gregorian:   ymd(1900, 2, 1),
                persian:     ymd(1278, 11, 10),
                description: "March in a non-leap century year",
            },
            TestCase {
                gregorian:   ymd(1600, 2, 20),
                persian:     ymd(979, 0, 1),
                description: "start of the counting epoch",
            },
        ];

        for case in &cases {
            assert_eq!(
                gregorian_to_persian(case.gregorian).unwrap(),
                case.persian,
                "gregorian -> persian failed for {}",
                case.description
            );
            assert_eq!(
                persian_to_gregorian(case.persian).unwrap(),
                case.gregorian,
                "persian -> gregorian failed for {}",
                case.description
            );
        }
    }

    /// Converts every day in `first..=last` both ways and checks that consecutive Gregorian
    /// days land on consecutive, valid Persian days.
    fn assert_round_trip_days(first: NaiveDate, last: NaiveDate) {
        let mut previous: Option<YearMonthDay> = None;
        for date in first.iter_days().take_while(|d| *d <= last) {
            let gregorian = ymd(date.year(), date.month0() as i32, date.day() as i32);
            let persian = gregorian_to_persian(gregorian).unwrap();
            assert_eq!(
                persian_to_gregorian(persian).unwrap(),
                gregorian,
                "round trip failed for {date} (persian {persian})"
            );

            assert!((0..12).contains(&persian.month), "bad month for {date}");
            let max_day = persian_days_in_month(persian.year, (persian.month + 1) as u8);
            assert!(
                (1..=i32::from(max_day)).contains(&persian.day),
                "bad day for {date}: {persian}"
            );

            if let Some(prev) = previous {
                let next_in_month = prev.day < i32::from(persian_days_in_month(prev.year, (prev.month + 1) as u8));
                let expected = if next_in_month {
                    ymd(prev.year, prev.month, prev.day + 1)
                } else if prev.month < 11 {
                    ymd(prev.year, prev.month + 1, 1)
                } else {
                    ymd(prev.year + 1, 0, 1)
                };
                assert_eq!(persian, expected, "discontinuity at {date}");
            }
            previous = Some(persian);
        }
    }

    #[test]
    fn test_round_trip_every_day_1900_to_2100() {
        assert_round_trip_days(
            NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2100, 12, 31).unwrap(),
        );
    }

    #[test]
    fn test_round_trip_every_day_before_979() {
        // From 1 January of year 1 up to and across 1 Farvardin 979.
        assert_round_trip_days(
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1600, 12, 31).unwrap(),
        );
    }

    #[test]
    fn test_known_conversions_before_979() {
        let cases = [
            (ymd(1600, 2, 19), ymd(978, 11, 29)),
            (ymd(1599, 0, 1), ymd(977, 9, 11)),
            (ymd(1500, 5, 1), ymd(879, 2, 11)),
            (ymd(622, 2, 22), ymd(1, 0, 2)),
            (ymd(1, 0, 1), ymd(-621, 9, 11)),
        ];

        for (gregorian, persian) in cases {
            assert_eq!(gregorian_to_persian(gregorian).unwrap(), persian, "from {gregorian}");
            assert_eq!(persian_to_gregorian(persian).unwrap(), gregorian, "from {persian}");
        }
    }

    #[test]
    fn test_leap_year_matches_esfand_30_before_979() {
        for year in -100..979 {
            let esfand_30 = ymd(year, 11, 30);
            let back = gregorian_to_persian(persian_to_gregorian(esfand_30).unwrap()).unwrap();
            let expected = if is_persian_leap_year(year) { esfand_30 } else { ymd(year + 1, 0, 1) };
            assert_eq!(back, expected, "year {year}");
        }
    }

    #[test]
    fn test_round_trip_persian_years() {
        for year in 1300..=1500 {
            for month in 0..12 {
                let max_day = persian_days_in_month(year, (month + 1) as u8);
                for day in [1, 15, i32::from(max_day)] {
                    let persian = ymd(year, month, day);
                    let gregorian = persian_to_gregorian(persian).unwrap();
                    assert_eq!(
                        gregorian_to_persian(gregorian).unwrap(),
                        persian,
                        "round trip failed for {persian}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_leap_year_matches_esfand_30() {
        for year in 1000..=2000 {
            let esfand_30 = ymd(year, 11, 30);
            let back = gregorian_to_persian(persian_to_gregorian(esfand_30).unwrap()).unwrap();
            if is_persian_leap_year(year) {
                assert_eq!(back, esfand_30, "year {year} should keep Esfand 30");
            } else {
                assert_eq!(back, ymd(year + 1, 0, 1), "year {year} should roll to Farvardin 1");
            }
        }
    }

    #[test]
    fn test_leap_years_around_present() {
        let leap: Vec<i32> = (1370..=1420).filter(|y| is_persian_leap_year(*y)).collect();
        assert_eq!(
            leap,
            vec![1370, 1375, 1379, 1383, 1387, 1391, 1395, 1399, 1403, 1408, 1412, 1416, 1420]
        );
    }

    #[test]
    fn test_eight_leap_years_per_cycle() {
        for start in [979, 1342, 1375, 2000] {
            let count = (start..start + 33).filter(|y| is_persian_leap_year(*y)).count();
            assert_eq!(count, 8, "cycle starting at {start}");
        }
    }

    #[test]
    fn test_days_in_month_and_year() {
        assert_eq!(persian_days_in_month(1400, 1), 31);
        assert_eq!(persian_days_in_month(1400, 6), 31);
        assert_eq!(persian_days_in_month(1400, 7), 30);
        assert_eq!(persian_days_in_month(1400, 11), 30);
        assert_eq!(persian_days_in_month(1400, 12), 29);
        assert_eq!(persian_days_in_month(1399, 12), 30);

        assert_eq!(persian_days_in_year(1399), 366);
        assert_eq!(persian_days_in_year(1400), 365);
    }

    #[test]
    fn test_gregorian_leap_year() {
        assert!(is_gregorian_leap_year(2000));
        assert!(is_gregorian_leap_year(2020));
        assert!(!is_gregorian_leap_year(1900));
        assert!(!is_gregorian_leap_year(2021));
    }

    #[test]
    fn test_invalid_month_rejected() {
        for month in [12, -12, 100, i32::MIN] {
            assert!(matches!(
                gregorian_to_persian(ymd(2021, month, 1)),
                Err(CalendarError::InvalidMonth(m)) if m == month
            ));
            assert!(matches!(
                persian_to_gregorian(ymd(1400, month, 1)),
                Err(CalendarError::InvalidMonth(m)) if m == month
            ));
        }
    }

    #[test]
    fn test_negative_month_is_accepted() {
        // Negative months skip the month table entirely.
        assert_eq!(
            gregorian_to_persian(ymd(2021, -1, 1)).unwrap(),
            gregorian_to_persian(ymd(2021, 0, 1)).unwrap()
        );
    }

    #[test]
    fn test_year_overflow_reported() {
        let result = persian_to_gregorian(ymd(i32::MAX, 0, 1));
        assert!(matches!(result, Err(CalendarError::YearOutOfRange(_))));
    }
}
