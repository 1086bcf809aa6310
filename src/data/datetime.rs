// src/data/datetime.rs

//! Datetime components, normalization helpers, and the calendar-checked
//! build of canonical [`Timestamp`] values.
//!
//! Turning a matched string into a `Timestamp` requires:
//! 1. reshaping the six [`ComponentArray`] slots for the requested
//!    [`TimelinessType`] (time-of-day values gain the dummy date, date-only
//!    values get a zeroed time part)
//! 2. checking the date part is a real calendar date (days per month,
//!    month range, February 29 only on leap years)
//! 3. checking the time part is a real wall-clock time
//!
//! The most relevant functions are:
//! - [`components_to_timestamp`] which does the reshape and the checks
//! - [`hour12_to_hour24`] and [`year2_to_year4`] which normalize the
//!   ambiguous tokens extractors are handed
//!
//! [`ComponentArray`]: crate::common::ComponentArray
//! [`TimelinessType`]: crate::common::TimelinessType
//! [`components_to_timestamp`]: self::components_to_timestamp
//! [`hour12_to_hour24`]: self::hour12_to_hour24
//! [`year2_to_year4`]: self::year2_to_year4

use crate::common::{
    Component,
    ComponentArray,
    TimelinessType,
    Year,
    CI_DAY,
    CI_HOUR,
    CI_MINUTE,
    CI_MONTH,
    CI_SECOND,
    CI_YEAR,
};
use crate::error::{ParseError, ParseResult};

use std::fmt;

extern crate chrono;
#[doc(hidden)]
pub use chrono::{
    Datelike, // adds method `.year()` onto `NaiveDate`
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Timelike, // adds method `.hour()` onto `NaiveTime`
};

extern crate lazy_static;
use lazy_static::lazy_static;

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// canonical timestamps
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The chrono datetime type used throughout. Values here are naive
/// wall-clock instants; a captured UTC offset is accepted by the ISO-8601
/// format but never applied.
pub type DateTimeT = NaiveDateTime;

/// Year of the dummy date anchoring time-only values.
pub const DUMMY_YEAR: Year = 2000;
/// Month of the dummy date anchoring time-only values.
pub const DUMMY_MONTH: Component = 1;
/// Day of the dummy date anchoring time-only values.
pub const DUMMY_DAY: Component = 1;

lazy_static! {
    /// The fixed date anchoring time-only values so they compare as full
    /// timestamps, 2000-01-01.
    pub static ref DUMMY_DATE: NaiveDate =
        NaiveDate::from_ymd_opt(DUMMY_YEAR, DUMMY_MONTH as u32, DUMMY_DAY as u32).unwrap();
}

/// A fully-resolved, calendar-valid parse result. Immutable once built.
///
/// Which variant is built follows the [`TimelinessType`] requested from
/// [`components_to_timestamp`], not the shape of the matched string.
///
/// [`TimelinessType`]: crate::common::TimelinessType
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Timestamp {
    /// a calendar date; midnight for comparison purposes
    Date(NaiveDate),
    /// a time of day; anchored to [`struct@DUMMY_DATE`] for comparison purposes
    Time(NaiveTime),
    /// a full wall-clock datetime
    DateTime(DateTimeT),
}

impl Timestamp {
    /// Returns `true` if this is a `Timestamp::Date`.
    #[inline(always)]
    pub const fn is_date(&self) -> bool {
        matches!(*self, Timestamp::Date(_))
    }

    /// Returns `true` if this is a `Timestamp::Time`.
    #[inline(always)]
    pub const fn is_time(&self) -> bool {
        matches!(*self, Timestamp::Time(_))
    }

    /// Returns `true` if this is a `Timestamp::DateTime`.
    #[inline(always)]
    pub const fn is_datetime(&self) -> bool {
        matches!(*self, Timestamp::DateTime(_))
    }

    /// The [`TimelinessType`] this value was built as.
    pub const fn type_(&self) -> TimelinessType {
        match *self {
            Timestamp::Date(_) => TimelinessType::Date,
            Timestamp::Time(_) => TimelinessType::Time,
            Timestamp::DateTime(_) => TimelinessType::DateTime,
        }
    }

    /// The comparison form of this value at the granularity of `type_`.
    ///
    /// A date contributes midnight for its missing time part; a time
    /// contributes the dummy date for its missing date part. Under
    /// `TimelinessType::Date` the time part is dropped (midnight); under
    /// `TimelinessType::Time` the date part is dropped (dummy date).
    /// Restriction evaluation applies this to both sides of a comparison.
    pub fn to_comparable(
        &self,
        type_: TimelinessType,
    ) -> DateTimeT {
        let (date, time): (NaiveDate, NaiveTime) = match self {
            Timestamp::Date(date) => (*date, NaiveTime::MIN),
            Timestamp::Time(time) => (*DUMMY_DATE, *time),
            Timestamp::DateTime(dt) => (dt.date(), dt.time()),
        };
        match type_ {
            TimelinessType::Date => date.and_time(NaiveTime::MIN),
            TimelinessType::Time => DUMMY_DATE.and_time(time),
            TimelinessType::DateTime => date.and_time(time),
        }
    }

    /// This value re-tagged at the granularity of `type_`; the variant
    /// returned always matches `type_`.
    pub fn with_type(
        &self,
        type_: TimelinessType,
    ) -> Timestamp {
        let dt: DateTimeT = self.to_comparable(type_);
        match type_ {
            TimelinessType::Date => Timestamp::Date(dt.date()),
            TimelinessType::Time => Timestamp::Time(dt.time()),
            TimelinessType::DateTime => Timestamp::DateTime(dt),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Timestamp::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Timestamp::Time(time) => write!(f, "{}", time.format("%H:%M:%S")),
            Timestamp::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// An input value for validation: raw text that must be parsed, or an
/// already-typed value that passes through without re-parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawValue {
    Text(String),
    Value(Timestamp),
}

impl RawValue {
    /// Returns `true` for empty or whitespace-only text. Typed values are
    /// never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Value(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> RawValue {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> RawValue {
        RawValue::Text(text)
    }
}

impl From<Timestamp> for RawValue {
    fn from(timestamp: Timestamp) -> RawValue {
        RawValue::Value(timestamp)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(date: NaiveDate) -> RawValue {
        RawValue::Value(Timestamp::Date(date))
    }
}

impl From<NaiveTime> for RawValue {
    fn from(time: NaiveTime) -> RawValue {
        RawValue::Value(Timestamp::Time(time))
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> RawValue {
        RawValue::Value(Timestamp::DateTime(dt))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// token normalization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Two-digit years strictly below this become 20XX, at or above become 19XX.
pub const YEAR2_THRESHOLD: Component = 30;

/// Integer conversion of one captured token.
pub fn str_to_component(token: &str) -> ParseResult<Component> {
    token
        .parse::<Component>()
        .map_err(|err| ParseError::Numeric(token.to_string(), err))
}

/// Transform a 12-hour clock hour and meridian token to a 24-hour clock
/// hour; `("12", "am")` is 0, `("12", "pm")` is 12, `("1", "pm")` is 13.
///
/// The meridian token is compared with punctuation removed,
/// case-insensitively, so `"p.m."`, `"PM"`, `"pm"` are all afternoon.
/// Anything that is not `am`/`pm` after that cleanup is an error.
pub fn hour12_to_hour24(
    hour: &str,
    meridian: &str,
) -> ParseResult<Component> {
    let h: Component = str_to_component(hour)?;
    let token: String = meridian.replace('.', "").to_lowercase();
    match token.as_str() {
        "am" => Ok(if h == 12 { 0 } else { h }),
        "pm" => Ok(if h == 12 { h } else { h + 12 }),
        _ => Err(ParseError::Meridian(meridian.to_string())),
    }
}

/// Transform a two-digit year token to a four-digit year using `threshold`
/// (see [`YEAR2_THRESHOLD`]). Tokens of any other length convert unchanged.
pub fn year2_to_year4(
    year: &str,
    threshold: Component,
) -> ParseResult<Component> {
    if year.len() != 2 {
        return str_to_component(year);
    }
    let y: Component = str_to_component(year)?;
    let century: Component = if y < threshold { 2000 } else { 1900 };
    Ok(century + y)
}

/// Transform an English month name, full (`"January"`) or three-letter
/// (`"jan"`, `"JAN"`), to the month number.
pub fn month_name_to_month(token: &str) -> ParseResult<Component> {
    let lower: String = token.to_lowercase();
    let month: Component = match lower.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return Err(ParseError::MonthName(token.to_string())),
    };
    Ok(month)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// component reshape and calendar-checked build
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build a [`Timestamp`] of `type_` from extracted components.
///
/// First the slots are reshaped:
/// - `Time`: slots 0–2 (the time format's hour/minute/second, positionally)
///   move to slots 3–5 and the dummy date fills slots 0–2
/// - `Date`: slots 3–5 are forced to zero
/// - `DateTime`: slots are used as extracted
///
/// Then the date part must be complete (year, month, day all present) and
/// name a real calendar date; absent time slots default to zero and the
/// time part must be a real wall-clock time. The calendar check runs for
/// every `type_`; under `Time` the dummy date makes it unfailable, which is
/// the point of substituting it first.
pub fn components_to_timestamp(
    components: &ComponentArray,
    type_: TimelinessType,
) -> ParseResult<Timestamp> {
    defn!("({:?}, {:?})", components, type_);
    let slots: ComponentArray = match type_ {
        TimelinessType::Time => [
            Some(DUMMY_YEAR),
            Some(DUMMY_MONTH),
            Some(DUMMY_DAY),
            components[CI_YEAR],
            components[CI_MONTH],
            components[CI_DAY],
        ],
        TimelinessType::Date => [
            components[CI_YEAR],
            components[CI_MONTH],
            components[CI_DAY],
            Some(0),
            Some(0),
            Some(0),
        ],
        TimelinessType::DateTime => *components,
    };
    let year: Component = match slots[CI_YEAR] {
        Some(year) => year,
        None => {
            defx!("return Err(Missing year)");
            return Err(ParseError::Missing("year"));
        }
    };
    let month: Component = match slots[CI_MONTH] {
        Some(month) => month,
        None => {
            defx!("return Err(Missing month)");
            return Err(ParseError::Missing("month"));
        }
    };
    let day: Component = match slots[CI_DAY] {
        Some(day) => day,
        None => {
            defx!("return Err(Missing day)");
            return Err(ParseError::Missing("day"));
        }
    };
    let hour: Component = slots[CI_HOUR].unwrap_or(0);
    let minute: Component = slots[CI_MINUTE].unwrap_or(0);
    let second: Component = slots[CI_SECOND].unwrap_or(0);
    let invalid = || ParseError::Calendar {
        y: year,
        m: month,
        d: day,
        h: hour,
        n: minute,
        s: second,
    };

    // chrono enforces month 1-12, days per month, and February 29 only on
    // leap years
    let date: NaiveDate = match (u32::try_from(month), u32::try_from(day)) {
        (Ok(m), Ok(d)) => match NaiveDate::from_ymd_opt(year, m, d) {
            Some(date) => date,
            None => {
                defx!("return Err(Calendar); bad date");
                return Err(invalid());
            }
        },
        _ => {
            defx!("return Err(Calendar); negative month or day");
            return Err(invalid());
        }
    };
    let time: NaiveTime = match (u32::try_from(hour), u32::try_from(minute), u32::try_from(second)) {
        (Ok(h), Ok(n), Ok(s)) => match NaiveTime::from_hms_opt(h, n, s) {
            Some(time) => time,
            None => {
                defx!("return Err(Calendar); bad time");
                return Err(invalid());
            }
        },
        _ => {
            defx!("return Err(Calendar); negative hour, minute, or second");
            return Err(invalid());
        }
    };

    let timestamp: Timestamp = match type_ {
        TimelinessType::Date => Timestamp::Date(date),
        TimelinessType::Time => Timestamp::Time(time),
        TimelinessType::DateTime => Timestamp::DateTime(date.and_time(time)),
    };
    defx!("return {:?}", timestamp);

    Ok(timestamp)
}
