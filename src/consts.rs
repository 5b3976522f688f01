/// Number of months in both calendars
pub const MONTHS_IN_YEAR: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number of Farvardin, the first Persian month
pub const FARVARDIN: u8 = 1;
/// Month number of Esfand, the last Persian month
pub const ESFAND: u8 = 12;

/// Days in Esfand for leap years
pub const ESFAND_DAYS_LEAP: u8 = 30;

/// Days in each Gregorian month (0-indexed, February shows the non-leap length)
pub const GREGORIAN_DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in each Persian month (0-indexed, Esfand shows the non-leap length)
pub const PERSIAN_DAYS_IN_MONTH: [i64; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Gregorian year the conversion day count starts from
pub(crate) const GREGORIAN_BASE_YEAR: i64 = 1600;
/// Persian year that begins inside [`GREGORIAN_BASE_YEAR`]
pub(crate) const PERSIAN_BASE_YEAR: i64 = 979;
/// Days from 1 January of the Gregorian base year to 1 Farvardin of the Persian base year
pub(crate) const NOWRUZ_OFFSET_DAYS: i64 = 79;

/// Days in a 33-year Persian cycle (8 leap years)
pub(crate) const PERSIAN_CYCLE_DAYS: i64 = 12_053;
/// Years in a Persian cycle
pub(crate) const PERSIAN_CYCLE_YEARS: i64 = 33;
/// Leap years in a Persian cycle
pub(crate) const PERSIAN_CYCLE_LEAPS: i64 = 8;

/// Days in four consecutive years with one leap year
pub(crate) const FOUR_YEAR_DAYS: i64 = 1461;
/// Days in a 400-year Gregorian cycle
pub(crate) const GREGORIAN_CYCLE_DAYS: i64 = 146_097;
/// Days in a Gregorian century whose first year is leap
pub(crate) const LEAP_CENTURY_DAYS: i64 = 36_525;
/// Days in a Gregorian century whose first year is not leap
pub(crate) const CENTURY_DAYS: i64 = 36_524;
/// Days in a common year
pub(crate) const COMMON_YEAR_DAYS: i64 = 365;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Persian month names, Farvardin first
pub const PERSIAN_MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Persian weekday names, Saturday (شنبه) first
pub const PERSIAN_WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Extended Arabic-Indic (Persian) digits, indexed by value
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digits, accepted when reading text back to Latin digits
pub const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Separator between the time and the long date
pub const TIME_SEPARATOR_WORD: &str = " ساعت ";

/// Default field separator for short dates and parsing
pub const DEFAULT_DELIMITER: &str = "/";
