// src/tests/datetime_tests.rs
// … ≤ ≥ ≠ ≟

//! tests for `datetime.rs` functions

#![allow(non_snake_case)]

use crate::common::{
    ComponentArray,
    TimelinessType,
    COMPONENTS_EMPTY,
};
use crate::data::datetime::{
    components_to_timestamp,
    hour12_to_hour24,
    month_name_to_month,
    str_to_component,
    year2_to_year4,
    RawValue,
    Timestamp,
    DUMMY_DATE,
    YEAR2_THRESHOLD,
};
use crate::error::ParseError;
use crate::tests::common::{
    hms,
    ymd,
    ymdhms,
};

use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// token conversion helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("12", "am", 0; "12am is midnight")]
#[test_case("12", "pm", 12; "12pm is noon")]
#[test_case("1", "am", 1)]
#[test_case("1", "pm", 13)]
#[test_case("11", "am", 11)]
#[test_case("11", "pm", 23)]
#[test_case("12", "AM", 0; "meridian uppercase")]
#[test_case("2", "P.M.", 14; "meridian uppercase dotted")]
#[test_case("7", "a.m.", 7; "meridian dotted")]
#[test_case("7", "p.m", 19; "meridian partially dotted")]
fn test_hour12_to_hour24(
    hour: &str,
    meridian: &str,
    expect: i32,
) {
    stack_offset_set(Some(2));
    assert_eq!(Ok(expect), hour12_to_hour24(hour, meridian));
}

#[test_case("xm")]
#[test_case("noon")]
#[test_case(""; "empty meridian")]
fn test_hour12_to_hour24_meridian_error(meridian: &str) {
    stack_offset_set(Some(2));
    match hour12_to_hour24("1", meridian) {
        Err(ParseError::Meridian(token)) => assert_eq!(token, meridian),
        result => panic!("expected Err(Meridian) for {:?}, got {:?}", meridian, result),
    }
}

#[test]
fn test_hour12_to_hour24_numeric_error() {
    stack_offset_set(Some(2));
    assert!(matches!(
        hour12_to_hour24("twelve", "am"),
        Err(ParseError::Numeric(_, _))
    ));
}

#[test_case("00", 2000)]
#[test_case("01", 2001)]
#[test_case("29", 2029; "highest below threshold")]
#[test_case("30", 1930; "threshold itself")]
#[test_case("68", 1968)]
#[test_case("99", 1999)]
#[test_case("1999", 1999; "four digits pass through")]
#[test_case("5", 5; "one digit passes through")]
#[test_case("029", 29; "three digits pass through")]
fn test_year2_to_year4(
    year: &str,
    expect: i32,
) {
    stack_offset_set(Some(2));
    assert_eq!(Ok(expect), year2_to_year4(year, YEAR2_THRESHOLD));
}

#[test]
fn test_year2_to_year4_threshold() {
    stack_offset_set(Some(2));
    // a different pivot moves the century boundary
    assert_eq!(Ok(1950), year2_to_year4("50", 50));
    assert_eq!(Ok(2049), year2_to_year4("49", 50));
}

#[test]
fn test_year2_to_year4_error() {
    stack_offset_set(Some(2));
    assert!(matches!(
        year2_to_year4("xx", YEAR2_THRESHOLD),
        Err(ParseError::Numeric(_, _))
    ));
}

#[test_case("jan", 1; "jan short")]
#[test_case("January", 1; "jan full")]
#[test_case("JAN", 1; "jan uppercase")]
#[test_case("feb", 2)]
#[test_case("may", 5; "may is both forms")]
#[test_case("sep", 9)]
#[test_case("September", 9)]
#[test_case("dec", 12)]
#[test_case("DECEMBER", 12)]
fn test_month_name_to_month(
    token: &str,
    expect: i32,
) {
    stack_offset_set(Some(2));
    assert_eq!(Ok(expect), month_name_to_month(token));
}

#[test_case("Wednesday")]
#[test_case("Smarch")]
#[test_case(""; "empty token")]
fn test_month_name_to_month_error(token: &str) {
    stack_offset_set(Some(2));
    match month_name_to_month(token) {
        Err(ParseError::MonthName(token_)) => assert_eq!(token_, token),
        result => panic!("expected Err(MonthName) for {:?}, got {:?}", token, result),
    }
}

#[test_case("0", 0)]
#[test_case("07", 7)]
#[test_case("2023", 2023)]
fn test_str_to_component(
    token: &str,
    expect: i32,
) {
    stack_offset_set(Some(2));
    assert_eq!(Ok(expect), str_to_component(token));
}

#[test]
fn test_str_to_component_error() {
    stack_offset_set(Some(2));
    assert!(matches!(
        str_to_component("7a"),
        Err(ParseError::Numeric(_, _))
    ));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// components_to_timestamp
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_components_to_timestamp_datetime() {
    stack_offset_set(Some(2));
    let components: ComponentArray =
        [Some(2023), Some(1), Some(15), Some(14), Some(30), Some(59)];
    assert_eq!(
        Ok(Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 59))),
        components_to_timestamp(&components, TimelinessType::DateTime),
    );
}

#[test]
fn test_components_to_timestamp_datetime_time_defaults_zero() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(2023), Some(1), Some(15), None, None, None];
    assert_eq!(
        Ok(Timestamp::DateTime(ymdhms(2023, 1, 15, 0, 0, 0))),
        components_to_timestamp(&components, TimelinessType::DateTime),
    );
}

#[test]
fn test_components_to_timestamp_date() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(2023), Some(1), Some(15), None, None, None];
    assert_eq!(
        Ok(Timestamp::Date(ymd(2023, 1, 15))),
        components_to_timestamp(&components, TimelinessType::Date),
    );
}

#[test]
fn test_components_to_timestamp_date_ignores_time_slots() {
    stack_offset_set(Some(2));
    // under a date build the time slots are forced to zero, so even junk
    // values there cannot fail the calendar check
    let components: ComponentArray = [Some(2023), Some(1), Some(15), Some(99), Some(99), Some(99)];
    assert_eq!(
        Ok(Timestamp::Date(ymd(2023, 1, 15))),
        components_to_timestamp(&components, TimelinessType::Date),
    );
}

#[test]
fn test_components_to_timestamp_time() {
    stack_offset_set(Some(2));
    // a time format extracts hour, minute, second positionally into
    // slots 0 to 2
    let components: ComponentArray = [Some(14), Some(30), Some(5), None, None, None];
    assert_eq!(
        Ok(Timestamp::Time(hms(14, 30, 5))),
        components_to_timestamp(&components, TimelinessType::Time),
    );
}

#[test]
fn test_components_to_timestamp_time_defaults() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(14), None, None, None, None, None];
    assert_eq!(
        Ok(Timestamp::Time(hms(14, 0, 0))),
        components_to_timestamp(&components, TimelinessType::Time),
    );
}

#[test]
fn test_components_to_timestamp_missing_year() {
    stack_offset_set(Some(2));
    assert_eq!(
        Err(ParseError::Missing("year")),
        components_to_timestamp(&COMPONENTS_EMPTY, TimelinessType::Date),
    );
}

#[test]
fn test_components_to_timestamp_missing_month() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(2023), None, None, None, None, None];
    assert_eq!(
        Err(ParseError::Missing("month")),
        components_to_timestamp(&components, TimelinessType::Date),
    );
}

#[test]
fn test_components_to_timestamp_missing_day() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(2023), Some(1), None, None, None, None];
    assert_eq!(
        Err(ParseError::Missing("day")),
        components_to_timestamp(&components, TimelinessType::DateTime),
    );
}

#[test_case(2023, 2, 30, 0, 0, 0; "february 30")]
#[test_case(2023, 2, 29, 0, 0, 0; "february 29 not a leap year")]
#[test_case(2023, 13, 1, 0, 0, 0; "month 13")]
#[test_case(2023, 0, 1, 0, 0, 0; "month 0")]
#[test_case(2023, 4, 31, 0, 0, 0; "april 31")]
#[test_case(2023, 1, 15, 24, 0, 0; "hour 24")]
#[test_case(2023, 1, 15, 12, 60, 0; "minute 60")]
#[test_case(2023, 1, 15, 12, 0, 60; "second 60")]
#[test_case(2023, -1, 15, 0, 0, 0; "negative month")]
#[test_case(2023, 1, 15, -1, 0, 0; "negative hour")]
fn test_components_to_timestamp_calendar_error(
    y: i32,
    m: i32,
    d: i32,
    h: i32,
    n: i32,
    s: i32,
) {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(y), Some(m), Some(d), Some(h), Some(n), Some(s)];
    let result = components_to_timestamp(&components, TimelinessType::DateTime);
    match result {
        Err(ref err) => assert!(
            err.is_calendar(),
            "expected a calendar error, got {:?}",
            err,
        ),
        Ok(_) => panic!("expected a calendar error, got {:?}", result),
    }
}

#[test]
fn test_components_to_timestamp_leap_day() {
    stack_offset_set(Some(2));
    let components: ComponentArray = [Some(2024), Some(2), Some(29), None, None, None];
    assert_eq!(
        Ok(Timestamp::Date(ymd(2024, 2, 29))),
        components_to_timestamp(&components, TimelinessType::Date),
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Timestamp
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_dummy_date() {
    stack_offset_set(Some(2));
    assert_eq!(*DUMMY_DATE, ymd(2000, 1, 1));
}

#[test]
fn test_timestamp_type_() {
    stack_offset_set(Some(2));
    let date = Timestamp::Date(ymd(2023, 1, 15));
    let time = Timestamp::Time(hms(14, 30, 0));
    let datetime = Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0));
    assert_eq!(TimelinessType::Date, date.type_());
    assert_eq!(TimelinessType::Time, time.type_());
    assert_eq!(TimelinessType::DateTime, datetime.type_());
    assert!(date.is_date() && !date.is_time() && !date.is_datetime());
    assert!(time.is_time() && !time.is_date() && !time.is_datetime());
    assert!(datetime.is_datetime() && !datetime.is_date() && !datetime.is_time());
}

#[test]
fn test_to_comparable_identity() {
    stack_offset_set(Some(2));
    let datetime = Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0));
    assert_eq!(
        ymdhms(2023, 1, 15, 14, 30, 0),
        datetime.to_comparable(TimelinessType::DateTime),
    );
}

#[test]
fn test_to_comparable_date_as_datetime() {
    stack_offset_set(Some(2));
    // a date compared at datetime granularity is its midnight
    let date = Timestamp::Date(ymd(2023, 1, 15));
    assert_eq!(
        ymdhms(2023, 1, 15, 0, 0, 0),
        date.to_comparable(TimelinessType::DateTime),
    );
}

#[test]
fn test_to_comparable_time_as_datetime() {
    stack_offset_set(Some(2));
    // a time compared at datetime granularity is anchored on the dummy date
    let time = Timestamp::Time(hms(14, 30, 0));
    assert_eq!(
        ymdhms(2000, 1, 1, 14, 30, 0),
        time.to_comparable(TimelinessType::DateTime),
    );
}

#[test]
fn test_to_comparable_datetime_as_date() {
    stack_offset_set(Some(2));
    // date granularity drops the time of day
    let datetime = Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0));
    assert_eq!(
        ymdhms(2023, 1, 15, 0, 0, 0),
        datetime.to_comparable(TimelinessType::Date),
    );
}

#[test]
fn test_to_comparable_datetime_as_time() {
    stack_offset_set(Some(2));
    // time granularity drops the date and re-anchors on the dummy date
    let datetime = Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0));
    assert_eq!(
        ymdhms(2000, 1, 1, 14, 30, 0),
        datetime.to_comparable(TimelinessType::Time),
    );
}

#[test]
fn test_to_comparable_date_as_time() {
    stack_offset_set(Some(2));
    // a bare date holds no time of day so only the dummy midnight remains
    let date = Timestamp::Date(ymd(2023, 1, 15));
    assert_eq!(
        ymdhms(2000, 1, 1, 0, 0, 0),
        date.to_comparable(TimelinessType::Time),
    );
}

#[test]
fn test_with_type() {
    stack_offset_set(Some(2));
    let datetime = Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0));
    assert_eq!(
        Timestamp::Date(ymd(2023, 1, 15)),
        datetime.with_type(TimelinessType::Date),
    );
    assert_eq!(
        Timestamp::Time(hms(14, 30, 0)),
        datetime.with_type(TimelinessType::Time),
    );
    let date = Timestamp::Date(ymd(2023, 1, 15));
    assert_eq!(
        Timestamp::DateTime(ymdhms(2023, 1, 15, 0, 0, 0)),
        date.with_type(TimelinessType::DateTime),
    );
    let time = Timestamp::Time(hms(14, 30, 0));
    assert_eq!(
        Timestamp::DateTime(ymdhms(2000, 1, 1, 14, 30, 0)),
        time.with_type(TimelinessType::DateTime),
    );
}

#[test]
fn test_timestamp_display() {
    stack_offset_set(Some(2));
    assert_eq!("2023-01-15", Timestamp::Date(ymd(2023, 1, 15)).to_string());
    assert_eq!("14:30:05", Timestamp::Time(hms(14, 30, 5)).to_string());
    assert_eq!(
        "2023-01-15 14:30:00",
        Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0)).to_string(),
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RawValue
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("", true; "empty text")]
#[test_case("   ", true; "whitespace only")]
#[test_case("\t\n", true; "tabs and newlines")]
#[test_case("x", false)]
#[test_case(" 2023-01-15 ", false)]
fn test_rawvalue_text_is_blank(
    text: &str,
    expect: bool,
) {
    stack_offset_set(Some(2));
    assert_eq!(expect, RawValue::Text(String::from(text)).is_blank());
}

#[test]
fn test_rawvalue_value_is_never_blank() {
    stack_offset_set(Some(2));
    let value = RawValue::Value(Timestamp::Date(ymd(2023, 1, 15)));
    assert!(!value.is_blank());
}

#[test]
fn test_rawvalue_from() {
    stack_offset_set(Some(2));
    assert_eq!(
        RawValue::Text(String::from("2023-01-15")),
        RawValue::from("2023-01-15"),
    );
    assert_eq!(
        RawValue::Text(String::from("2023-01-15")),
        RawValue::from(String::from("2023-01-15")),
    );
    assert_eq!(
        RawValue::Value(Timestamp::Date(ymd(2023, 1, 15))),
        RawValue::from(ymd(2023, 1, 15)),
    );
    assert_eq!(
        RawValue::Value(Timestamp::Time(hms(14, 30, 0))),
        RawValue::from(hms(14, 30, 0)),
    );
    assert_eq!(
        RawValue::Value(Timestamp::DateTime(ymdhms(2023, 1, 15, 14, 30, 0))),
        RawValue::from(ymdhms(2023, 1, 15, 14, 30, 0)),
    );
    assert_eq!(
        RawValue::Value(Timestamp::Date(ymd(2023, 1, 15))),
        RawValue::from(Timestamp::Date(ymd(2023, 1, 15))),
    );
}
