// src/data/formats.rs

//! Format definitions, the [`FormatRegistry`], and format-driven extraction
//! of datetime components from loosely-formatted strings.
//!
//! A [`FormatDefinition`] pairs a compiled regular expression with an
//! [`Extraction`] describing how its capture groups become the six
//! [`ComponentArray`] slots. Definitions live in a [`FormatRegistry`], one
//! ordered table per [`TimelinessType`]; table order is match-priority
//! order, and matching stops at the first accepted definition.
//!
//! The built-in tables ([`TIME_PARSE_DATAS`], [`DATE_PARSE_DATAS`],
//! [`DATETIME_PARSE_DATAS`]) are `const` data built from `const` pattern
//! fragments with [`concatcp!`]. Each entry embeds example inputs with their
//! expected decompositions, checked by tests. The shared ready-to-use form
//! is [`struct@FORMAT_REGISTRY_DEFAULT`].
//!
//! The most relevant functions are:
//! - [`string_to_timestamp`], the parse pipeline entry point
//! - [`extract_components`], the first-match scan over a format table
//! - [`FormatRegistry::register`] and [`FormatRegistry::compose`]
//!
//! A registry is never shared mutable state. Customization clones an
//! existing registry (usually [`struct@FORMAT_REGISTRY_DEFAULT`]) and
//! registers into the clone.
//!
//! [`ComponentArray`]: crate::common::ComponentArray
//! [`TimelinessType`]: crate::common::TimelinessType
//! [`concatcp!`]: const_format::concatcp
//! [`string_to_timestamp`]: self::string_to_timestamp
//! [`extract_components`]: self::extract_components

#![allow(non_camel_case_types)]

use crate::common::{
    Component,
    ComponentArray,
    TimelinessType,
    CI_DAY,
    CI_HOUR,
    CI_MINUTE,
    CI_MONTH,
    CI_SECOND,
    CI_YEAR,
    COMPONENTS_EMPTY,
    COMPONENT_COUNT,
};
use crate::data::datetime::{
    components_to_timestamp,
    hour12_to_hour24,
    month_name_to_month,
    str_to_component,
    year2_to_year4,
    Timestamp,
    YEAR2_THRESHOLD,
};
use crate::error::{ParseError, ParseResult, RegistryError, RegistryResult};

extern crate const_format;
use const_format::concatcp;

extern crate lazy_static;
use lazy_static::lazy_static;

extern crate more_asserts;
#[allow(unused_imports)]
use more_asserts::debug_assert_le;

extern crate regex;
use regex::Regex;

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

/// An owned format name; the unique key of a [`FormatDefinition`] within
/// its category.
pub type FormatName = String;
/// A format name.
pub type FormatName_str = str;
/// An uncompiled regular expression pattern for a format.
pub type FormatPattern_str = str;

/// Function signature of a custom extractor: the captured group texts, in
/// group order, to a [`ComponentArray`] filled from slot 0.
///
/// The groups slice length always equals the arity declared at
/// registration.
pub type ExtractorFn = fn(&[&str]) -> ParseResult<ComponentArray>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// extraction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How a [`FormatDefinition`]'s capture groups become components.
#[derive(Clone, Copy, Debug)]
pub enum Extraction {
    /// the first 1–6 captured groups convert to whole numbers and fill
    /// consecutive slots starting at slot 0
    Positional,
    /// a custom function over exactly `arity` captured groups; arity is
    /// checked against the pattern's group count at registration
    Extractor { f: ExtractorFn, arity: usize },
    /// date-part extraction over the leading `date_groups` groups, then
    /// time-part extraction over the following `time_groups` groups, the
    /// time part shifted into slots 3–5; built by [`FormatRegistry::compose`]
    Composed {
        date: SideExtraction,
        date_groups: usize,
        time: SideExtraction,
        time_groups: usize,
    },
}

/// One side of a composed datetime extraction. Composition is one level
/// deep: a composed definition cannot itself be a side.
#[derive(Clone, Copy, Debug)]
pub enum SideExtraction {
    Positional,
    Extractor { f: ExtractorFn, arity: usize },
}

impl Extraction {
    fn apply(
        &self,
        name: &FormatName_str,
        groups: &[Option<&str>],
    ) -> ParseResult<ComponentArray> {
        match *self {
            Extraction::Positional => extract_positional(name, groups, 0),
            Extraction::Extractor { f, arity } => extract_with_fn(f, arity, name, groups, 0),
            Extraction::Composed {
                date,
                date_groups,
                time,
                time_groups,
            } => {
                let date_components: ComponentArray =
                    date.apply(name, &groups[..date_groups], 0)?;
                let time_components: ComponentArray =
                    time.apply(name, &groups[date_groups..date_groups + time_groups], date_groups)?;
                // the time side fills slots 0-2 under its own ordering
                // contract; shift them onto the time slots
                let mut components: ComponentArray = date_components;
                components[CI_HOUR] = time_components[CI_YEAR];
                components[CI_MINUTE] = time_components[CI_MONTH];
                components[CI_SECOND] = time_components[CI_DAY];
                Ok(components)
            }
        }
    }
}

impl SideExtraction {
    fn apply(
        &self,
        name: &FormatName_str,
        groups: &[Option<&str>],
        base: usize,
    ) -> ParseResult<ComponentArray> {
        match *self {
            SideExtraction::Positional => extract_positional(name, groups, base),
            SideExtraction::Extractor { f, arity } => extract_with_fn(f, arity, name, groups, base),
        }
    }
}

/// Convert the leading captured groups to components, positionally.
/// `base` offsets group indexes in errors, for composed patterns.
fn extract_positional(
    name: &FormatName_str,
    groups: &[Option<&str>],
    base: usize,
) -> ParseResult<ComponentArray> {
    let mut components: ComponentArray = COMPONENTS_EMPTY;
    let take: usize = groups.len().min(COMPONENT_COUNT);
    for (slot, group) in groups[..take].iter().enumerate() {
        let text: &str = match group {
            Some(text) => text,
            None => {
                return Err(ParseError::EmptyCapture {
                    name: name.to_string(),
                    index: base + slot + 1,
                })
            }
        };
        components[slot] = Some(str_to_component(text)?);
    }
    Ok(components)
}

/// Gather `arity` captured groups and hand them to extractor `f`.
fn extract_with_fn(
    f: ExtractorFn,
    arity: usize,
    name: &FormatName_str,
    groups: &[Option<&str>],
    base: usize,
) -> ParseResult<ComponentArray> {
    debug_assert_le!(arity, groups.len());
    let mut texts: Vec<&str> = Vec::with_capacity(arity);
    for (offset, group) in groups[..arity].iter().enumerate() {
        match group {
            Some(text) => texts.push(text),
            None => {
                return Err(ParseError::EmptyCapture {
                    name: name.to_string(),
                    index: base + offset + 1,
                })
            }
        }
    }
    f(&texts)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// built-in extractor functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Extractor for `(hour, minute, meridian)` captures; the 12-hour clock
/// time formats with minutes.
pub fn extract_hn_meridian(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let hour: Component = hour12_to_hour24(groups[0], groups[2])?;
    let minute: Component = str_to_component(groups[1])?;
    Ok([Some(hour), Some(minute), Some(0), None, None, None])
}

/// Extractor for `(hour, meridian)` captures; a bare 12-hour clock hour.
pub fn extract_h_meridian(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 2);
    let hour: Component = hour12_to_hour24(groups[0], groups[1])?;
    Ok([Some(hour), Some(0), Some(0), None, None, None])
}

/// Extractor for `(month, day, year)` captures, four-digit year.
pub fn extract_month_day_year(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = str_to_component(groups[2])?;
    let month: Component = str_to_component(groups[0])?;
    let day: Component = str_to_component(groups[1])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

/// Extractor for `(day, month, year)` captures, four-digit year.
pub fn extract_day_month_year(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = str_to_component(groups[2])?;
    let month: Component = str_to_component(groups[1])?;
    let day: Component = str_to_component(groups[0])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

/// Extractor for `(month, day, year)` captures, two-digit year resolved
/// with [`year2_to_year4`].
pub fn extract_month_day_year2(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = year2_to_year4(groups[2], YEAR2_THRESHOLD)?;
    let month: Component = str_to_component(groups[0])?;
    let day: Component = str_to_component(groups[1])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

/// Extractor for `(day, month, year)` captures, two-digit year resolved
/// with [`year2_to_year4`].
pub fn extract_day_month_year2(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = year2_to_year4(groups[2], YEAR2_THRESHOLD)?;
    let month: Component = str_to_component(groups[1])?;
    let day: Component = str_to_component(groups[0])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

/// Extractor for `(day, month-name, year)` captures, four-digit year.
pub fn extract_day_monthname_year(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = str_to_component(groups[2])?;
    let month: Component = month_name_to_month(groups[1])?;
    let day: Component = str_to_component(groups[0])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

/// Extractor for `(day, month-name, year)` captures, two-digit year.
pub fn extract_day_monthname_year2(groups: &[&str]) -> ParseResult<ComponentArray> {
    debug_assert_eq!(groups.len(), 3);
    let year: Component = year2_to_year4(groups[2], YEAR2_THRESHOLD)?;
    let month: Component = month_name_to_month(groups[1])?;
    let day: Component = str_to_component(groups[0])?;
    Ok([Some(year), Some(month), Some(day), None, None, None])
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// const pattern fragments
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// regexp capture group for a two-digit field
pub const CGP_D2: &FormatPattern_str = r"(\d{2})";
/// regexp capture group for a four-digit field
pub const CGP_D4: &FormatPattern_str = r"(\d{4})";
/// regexp capture group for a one or two digit field
pub const CGP_D12: &FormatPattern_str = r"(\d{1,2})";
/// regexp capture group for a meridian token; `am`/`pm`, optional dots,
/// any case
pub const CGP_MERIDIAN: &FormatPattern_str = r"((?i:[ap]\.?m\.?))";
/// regexp capture group for a month-name word of three to nine letters
pub const CGP_MONTH_NAME: &FormatPattern_str = r"(\w{3,9})";

// field dividers
pub const D_COLON: &FormatPattern_str = ":";
pub const D_DASH: &FormatPattern_str = "-";
pub const D_DOT: &FormatPattern_str = r"\.";
pub const D_SLASH: &FormatPattern_str = "/";
pub const D_SPACE: &FormatPattern_str = " ";
/// one whitespace character; also the divider joining the date and time
/// parts of the built-in composed datetime patterns
pub const D_WS: &FormatPattern_str = r"\s";
/// optional whitespace before a meridian token
pub const D_WS_OPT: &FormatPattern_str = r"\s?";
/// the literal `T` joining the parts of an ISO-8601 datetime
pub const D_T: &FormatPattern_str = "T";
/// optional ISO-8601 UTC offset suffix, `Z` or `±hh:mm`; the offset digits
/// are captured but sit beyond the six component slots so they are never
/// applied
pub const RP_TZ_OFFSET: &FormatPattern_str = r"(?:Z|[-+](\d{2}):(\d{2}))?";

// time patterns
pub const RP_TIME_HHNNSS_COLONS: &FormatPattern_str = concatcp!(CGP_D2, D_COLON, CGP_D2, D_COLON, CGP_D2);
pub const RP_TIME_HHNNSS_DASHES: &FormatPattern_str = concatcp!(CGP_D2, D_DASH, CGP_D2, D_DASH, CGP_D2);
pub const RP_TIME_HHNN_COLONS: &FormatPattern_str = concatcp!(CGP_D2, D_COLON, CGP_D2);
pub const RP_TIME_HNN_DOTS: &FormatPattern_str = concatcp!(CGP_D12, D_DOT, CGP_D2);
pub const RP_TIME_HNN_SPACES: &FormatPattern_str = concatcp!(CGP_D12, D_WS, CGP_D2);
pub const RP_TIME_HNN_DASHES: &FormatPattern_str = concatcp!(CGP_D12, D_DASH, CGP_D2);
pub const RP_TIME_HNN_AMPM_COLONS: &FormatPattern_str =
    concatcp!(CGP_D12, D_COLON, CGP_D2, D_WS_OPT, CGP_MERIDIAN);
pub const RP_TIME_HNN_AMPM_DOTS: &FormatPattern_str =
    concatcp!(CGP_D12, D_DOT, CGP_D2, D_WS_OPT, CGP_MERIDIAN);
pub const RP_TIME_HNN_AMPM_SPACES: &FormatPattern_str =
    concatcp!(CGP_D12, D_WS, CGP_D2, D_WS_OPT, CGP_MERIDIAN);
pub const RP_TIME_HNN_AMPM_DASHES: &FormatPattern_str =
    concatcp!(CGP_D12, D_DASH, CGP_D2, D_WS_OPT, CGP_MERIDIAN);
pub const RP_TIME_H_AMPM: &FormatPattern_str = concatcp!(CGP_D12, D_WS_OPT, CGP_MERIDIAN);

// date patterns
pub const RP_DATE_YYYYMMDD_SLASHES: &FormatPattern_str = concatcp!(CGP_D4, D_SLASH, CGP_D2, D_SLASH, CGP_D2);
pub const RP_DATE_YYYYMMDD_DASHES: &FormatPattern_str = concatcp!(CGP_D4, D_DASH, CGP_D2, D_DASH, CGP_D2);
pub const RP_DATE_YYYYMMDD_DOTS: &FormatPattern_str = concatcp!(CGP_D4, D_DOT, CGP_D2, D_DOT, CGP_D2);
/// shared by `mdyyyy_slashes` and `dmyyyy_slashes`; only the extractor
/// differs
pub const RP_DATE_MDYYYY_SLASHES: &FormatPattern_str =
    concatcp!(CGP_D12, D_SLASH, CGP_D12, D_SLASH, CGP_D4);
pub const RP_DATE_DMYYYY_DASHES: &FormatPattern_str =
    concatcp!(CGP_D12, D_DASH, CGP_D12, D_DASH, CGP_D4);
pub const RP_DATE_DMYYYY_DOTS: &FormatPattern_str =
    concatcp!(CGP_D12, D_DOT, CGP_D12, D_DOT, CGP_D4);
/// shared by `mdyy_slashes` and `dmyy_slashes`; only the extractor differs
pub const RP_DATE_MDYY_SLASHES: &FormatPattern_str =
    concatcp!(CGP_D12, D_SLASH, CGP_D12, D_SLASH, CGP_D2);
pub const RP_DATE_DMYY_DASHES: &FormatPattern_str =
    concatcp!(CGP_D12, D_DASH, CGP_D12, D_DASH, CGP_D2);
pub const RP_DATE_DMYY_DOTS: &FormatPattern_str =
    concatcp!(CGP_D12, D_DOT, CGP_D12, D_DOT, CGP_D2);
pub const RP_DATE_D_MMM_YYYY: &FormatPattern_str =
    concatcp!(CGP_D12, D_SPACE, CGP_MONTH_NAME, D_SPACE, CGP_D4);
pub const RP_DATE_D_MMM_YY: &FormatPattern_str =
    concatcp!(CGP_D12, D_SPACE, CGP_MONTH_NAME, D_SPACE, CGP_D2);

// datetime patterns; precomputed forms of what `compose` builds at runtime
pub const RP_DATETIME_YYYYMMDD_HHNNSS: &FormatPattern_str =
    concatcp!(RP_DATE_YYYYMMDD_DASHES, D_WS, RP_TIME_HHNNSS_COLONS);
pub const RP_DATETIME_YYYYMMDD_HHNN: &FormatPattern_str =
    concatcp!(RP_DATE_YYYYMMDD_DASHES, D_WS, RP_TIME_HHNN_COLONS);
pub const RP_DATETIME_ISO8601: &FormatPattern_str =
    concatcp!(RP_DATE_YYYYMMDD_DASHES, D_T, RP_TIME_HHNNSS_COLONS, RP_TZ_OFFSET);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// built-in format tables
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One built-in format table entry; everything needed to `register` one
/// [`FormatDefinition`].
#[derive(Clone, Copy, Debug)]
pub struct FormatParseData {
    /// format name, unique within its category table
    pub name: &'static FormatName_str,
    /// uncompiled pattern
    pub pattern: &'static FormatPattern_str,
    /// capture-group handling
    pub extraction: Extraction,
    /// example inputs with expected component decompositions, exercised by
    /// tests over the tables
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'static [(&'static str, ComponentArray)],
    /// line number of the table entry, to aid debugging
    pub _line_num: u32,
}

/// Declare a [`FormatParseData`] table entry.
macro_rules! FD {
    (
        $name:expr,
        $pattern:expr,
        $extraction:expr,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        FormatParseData {
            name: $name,
            pattern: $pattern,
            extraction: $extraction,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}

pub const TIME_PARSE_DATAS_LEN: usize = 11;

/// Built-in time formats in match-priority order.
///
/// A time format fills slots 0–2 with hour, minute, second;
/// [`components_to_timestamp`] reinterprets the positions for
/// `TimelinessType::Time`.
pub const TIME_PARSE_DATAS: [FormatParseData; TIME_PARSE_DATAS_LEN] = [
    FD!(
        "hhnnss_colons",
        RP_TIME_HHNNSS_COLONS,
        Extraction::Positional,
        &[
            ("14:30:00", [Some(14), Some(30), Some(0), None, None, None]),
            ("23:59:59", [Some(23), Some(59), Some(59), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "hhnnss_dashes",
        RP_TIME_HHNNSS_DASHES,
        Extraction::Positional,
        &[("14-30-00", [Some(14), Some(30), Some(0), None, None, None])],
        line!(),
    ),
    FD!(
        "hhnn_colons",
        RP_TIME_HHNN_COLONS,
        Extraction::Positional,
        &[("14:30", [Some(14), Some(30), None, None, None, None])],
        line!(),
    ),
    FD!(
        "hnn_dots",
        RP_TIME_HNN_DOTS,
        Extraction::Positional,
        &[
            ("9.35", [Some(9), Some(35), None, None, None, None]),
            ("12.05", [Some(12), Some(5), None, None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "hnn_spaces",
        RP_TIME_HNN_SPACES,
        Extraction::Positional,
        &[("9 35", [Some(9), Some(35), None, None, None, None])],
        line!(),
    ),
    FD!(
        "hnn_dashes",
        RP_TIME_HNN_DASHES,
        Extraction::Positional,
        &[("9-35", [Some(9), Some(35), None, None, None, None])],
        line!(),
    ),
    FD!(
        "hnn_ampm_colons",
        RP_TIME_HNN_AMPM_COLONS,
        Extraction::Extractor { f: extract_hn_meridian, arity: 3 },
        &[
            ("2:30pm", [Some(14), Some(30), Some(0), None, None, None]),
            ("12:15 AM", [Some(0), Some(15), Some(0), None, None, None]),
            ("12:01 p.m.", [Some(12), Some(1), Some(0), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "hnn_ampm_dots",
        RP_TIME_HNN_AMPM_DOTS,
        Extraction::Extractor { f: extract_hn_meridian, arity: 3 },
        &[("2.30pm", [Some(14), Some(30), Some(0), None, None, None])],
        line!(),
    ),
    FD!(
        "hnn_ampm_spaces",
        RP_TIME_HNN_AMPM_SPACES,
        Extraction::Extractor { f: extract_hn_meridian, arity: 3 },
        &[("2 30 pm", [Some(14), Some(30), Some(0), None, None, None])],
        line!(),
    ),
    FD!(
        "hnn_ampm_dashes",
        RP_TIME_HNN_AMPM_DASHES,
        Extraction::Extractor { f: extract_hn_meridian, arity: 3 },
        &[("2-30pm", [Some(14), Some(30), Some(0), None, None, None])],
        line!(),
    ),
    FD!(
        "h_ampm",
        RP_TIME_H_AMPM,
        Extraction::Extractor { f: extract_h_meridian, arity: 2 },
        &[
            ("2pm", [Some(14), Some(0), Some(0), None, None, None]),
            ("12am", [Some(0), Some(0), Some(0), None, None, None]),
            ("11 PM", [Some(23), Some(0), Some(0), None, None, None]),
        ],
        line!(),
    ),
];

pub const DATE_PARSE_DATAS_LEN: usize = 13;

/// Built-in date formats in match-priority order.
///
/// `mdyyyy_slashes`/`dmyyyy_slashes` and `mdyy_slashes`/`dmyy_slashes`
/// share one pattern with different extractors; under this ordering the
/// month-first interpretation wins and the day-first entries are reachable
/// only through a reordered custom registry.
pub const DATE_PARSE_DATAS: [FormatParseData; DATE_PARSE_DATAS_LEN] = [
    FD!(
        "yyyymmdd_slashes",
        RP_DATE_YYYYMMDD_SLASHES,
        Extraction::Positional,
        &[("2023/01/15", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "yyyymmdd_dashes",
        RP_DATE_YYYYMMDD_DASHES,
        Extraction::Positional,
        &[
            ("2023-01-15", [Some(2023), Some(1), Some(15), None, None, None]),
            ("1999-12-31", [Some(1999), Some(12), Some(31), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "yyyymmdd_dots",
        RP_DATE_YYYYMMDD_DOTS,
        Extraction::Positional,
        &[("2023.01.15", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "mdyyyy_slashes",
        RP_DATE_MDYYYY_SLASHES,
        Extraction::Extractor { f: extract_month_day_year, arity: 3 },
        &[
            ("1/15/2023", [Some(2023), Some(1), Some(15), None, None, None]),
            ("12/31/1999", [Some(1999), Some(12), Some(31), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "dmyyyy_slashes",
        RP_DATE_MDYYYY_SLASHES,
        Extraction::Extractor { f: extract_day_month_year, arity: 3 },
        &[("15/1/2023", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "dmyyyy_dashes",
        RP_DATE_DMYYYY_DASHES,
        Extraction::Extractor { f: extract_day_month_year, arity: 3 },
        &[("15-1-2023", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "dmyyyy_dots",
        RP_DATE_DMYYYY_DOTS,
        Extraction::Extractor { f: extract_day_month_year, arity: 3 },
        &[("15.1.2023", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "mdyy_slashes",
        RP_DATE_MDYY_SLASHES,
        Extraction::Extractor { f: extract_month_day_year2, arity: 3 },
        &[
            ("1/15/23", [Some(2023), Some(1), Some(15), None, None, None]),
            ("12/31/99", [Some(1999), Some(12), Some(31), None, None, None]),
            ("1/15/30", [Some(1930), Some(1), Some(15), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "dmyy_slashes",
        RP_DATE_MDYY_SLASHES,
        Extraction::Extractor { f: extract_day_month_year2, arity: 3 },
        &[("15/1/23", [Some(2023), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "dmyy_dashes",
        RP_DATE_DMYY_DASHES,
        Extraction::Extractor { f: extract_day_month_year2, arity: 3 },
        &[("15-1-99", [Some(1999), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "dmyy_dots",
        RP_DATE_DMYY_DOTS,
        Extraction::Extractor { f: extract_day_month_year2, arity: 3 },
        &[("15.1.99", [Some(1999), Some(1), Some(15), None, None, None])],
        line!(),
    ),
    FD!(
        "d_mmm_yyyy",
        RP_DATE_D_MMM_YYYY,
        Extraction::Extractor { f: extract_day_monthname_year, arity: 3 },
        &[
            ("15 January 2023", [Some(2023), Some(1), Some(15), None, None, None]),
            ("1 Jun 2000", [Some(2000), Some(6), Some(1), None, None, None]),
        ],
        line!(),
    ),
    FD!(
        "d_mmm_yy",
        RP_DATE_D_MMM_YY,
        Extraction::Extractor { f: extract_day_monthname_year2, arity: 3 },
        &[
            ("15 Jan 23", [Some(2023), Some(1), Some(15), None, None, None]),
            ("3 September 99", [Some(1999), Some(9), Some(3), None, None, None]),
        ],
        line!(),
    ),
];

pub const DATETIME_PARSE_DATAS_LEN: usize = 3;

/// Built-in datetime formats in match-priority order, each the composition
/// of a date format and a time format. The ISO-8601 entry appends the
/// optional offset suffix; its offset groups sit beyond the six extracted
/// groups.
pub const DATETIME_PARSE_DATAS: [FormatParseData; DATETIME_PARSE_DATAS_LEN] = [
    FD!(
        "yyyymmdd_dashes_hhnnss_colons",
        RP_DATETIME_YYYYMMDD_HHNNSS,
        Extraction::Composed {
            date: SideExtraction::Positional,
            date_groups: 3,
            time: SideExtraction::Positional,
            time_groups: 3,
        },
        &[(
            "2023-01-15 14:30:00",
            [Some(2023), Some(1), Some(15), Some(14), Some(30), Some(0)],
        )],
        line!(),
    ),
    FD!(
        "yyyymmdd_dashes_hhnn_colons",
        RP_DATETIME_YYYYMMDD_HHNN,
        Extraction::Composed {
            date: SideExtraction::Positional,
            date_groups: 3,
            time: SideExtraction::Positional,
            time_groups: 2,
        },
        &[(
            "2023-01-15 14:30",
            [Some(2023), Some(1), Some(15), Some(14), Some(30), None],
        )],
        line!(),
    ),
    FD!(
        "iso8601",
        RP_DATETIME_ISO8601,
        Extraction::Composed {
            date: SideExtraction::Positional,
            date_groups: 3,
            time: SideExtraction::Positional,
            time_groups: 3,
        },
        &[
            (
                "2023-01-15T14:30:00",
                [Some(2023), Some(1), Some(15), Some(14), Some(30), Some(0)],
            ),
            (
                "2023-01-15T14:30:00Z",
                [Some(2023), Some(1), Some(15), Some(14), Some(30), Some(0)],
            ),
            (
                "2023-01-15T14:30:00+05:30",
                [Some(2023), Some(1), Some(15), Some(14), Some(30), Some(0)],
            ),
        ],
        line!(),
    ),
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// format definitions and the registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One registered format: a name, a compiled pattern, and its
/// [`Extraction`]. Created by [`FormatRegistry::register`].
#[derive(Clone, Debug)]
pub struct FormatDefinition {
    /// unique key within the category
    pub name: FormatName,
    /// the compiled pattern; `regex.as_str()` is the pattern source
    pub regex: Regex,
    /// how captures become components
    pub extraction: Extraction,
}

impl FormatDefinition {
    /// Apply this format to `text` (already trimmed by the caller).
    ///
    /// `Ok(None)` means the pattern did not match, or under `bounded` did
    /// not span all of `text`; the caller tries the next format. An `Err`
    /// is a failure of the matched text itself and ends the format scan.
    pub fn extract(
        &self,
        text: &str,
        bounded: bool,
    ) -> ParseResult<Option<ComponentArray>> {
        let captures = match self.regex.captures(text) {
            Some(captures) => captures,
            None => return Ok(None),
        };
        if bounded {
            // group 0 is the whole match
            let whole = match captures.get(0) {
                Some(whole) => whole,
                None => return Ok(None),
            };
            if whole.start() != 0 || whole.end() != text.len() {
                return Ok(None);
            }
        }
        let count: usize = self.regex.captures_len() - 1;
        let mut groups: Vec<Option<&str>> = Vec::with_capacity(count);
        for index in 1..=count {
            groups.push(captures.get(index).map(|m| m.as_str()));
        }
        let components: ComponentArray = self.extraction.apply(&self.name, &groups)?;
        Ok(Some(components))
    }
}

/// Ordered format definitions, one table per [`TimelinessType`].
///
/// Iteration order is registration order is match-priority order.
/// Registering an existing name replaces the prior definition *at its
/// position* and hands the displaced definition back, so a collision is
/// detectable by the caller instead of silently shadowing a pattern.
#[derive(Clone, Debug, Default)]
pub struct FormatRegistry {
    time: Vec<FormatDefinition>,
    date: Vec<FormatDefinition>,
    datetime: Vec<FormatDefinition>,
}

impl FormatRegistry {
    /// An empty registry with no formats in any category.
    pub fn new() -> FormatRegistry {
        FormatRegistry {
            time: Vec::new(),
            date: Vec::new(),
            datetime: Vec::new(),
        }
    }

    /// A registry holding the built-in tables ([`TIME_PARSE_DATAS`],
    /// [`DATE_PARSE_DATAS`], [`DATETIME_PARSE_DATAS`]) in table order.
    ///
    /// Prefer [`struct@FORMAT_REGISTRY_DEFAULT`] unless the registry will
    /// be customized.
    pub fn builtin() -> RegistryResult<FormatRegistry> {
        defn!();
        let mut registry: FormatRegistry = FormatRegistry::new();
        let tables: [(TimelinessType, &[FormatParseData]); 3] = [
            (TimelinessType::Time, &TIME_PARSE_DATAS[..]),
            (TimelinessType::Date, &DATE_PARSE_DATAS[..]),
            (TimelinessType::DateTime, &DATETIME_PARSE_DATAS[..]),
        ];
        for (type_, table) in tables.iter() {
            for data in table.iter() {
                let _displaced: Option<FormatDefinition> =
                    registry.register(*type_, data.name, data.pattern, data.extraction)?;
                debug_assert!(
                    _displaced.is_none(),
                    "{} format name collision {:?}",
                    type_,
                    data.name
                );
            }
        }
        defx!();
        Ok(registry)
    }

    fn table(
        &self,
        type_: TimelinessType,
    ) -> &Vec<FormatDefinition> {
        match type_ {
            TimelinessType::Time => &self.time,
            TimelinessType::Date => &self.date,
            TimelinessType::DateTime => &self.datetime,
        }
    }

    fn table_mut(
        &mut self,
        type_: TimelinessType,
    ) -> &mut Vec<FormatDefinition> {
        match type_ {
            TimelinessType::Time => &mut self.time,
            TimelinessType::Date => &mut self.date,
            TimelinessType::DateTime => &mut self.datetime,
        }
    }

    /// The ordered definitions of one category; iteration order is
    /// match-priority order.
    pub fn definitions(
        &self,
        type_: TimelinessType,
    ) -> &[FormatDefinition] {
        self.table(type_).as_slice()
    }

    /// The definition registered under `name`, if any.
    pub fn find(
        &self,
        type_: TimelinessType,
        name: &FormatName_str,
    ) -> Option<&FormatDefinition> {
        self.table(type_).iter().find(|definition| definition.name == name)
    }

    /// Add or replace one format definition.
    ///
    /// The pattern is compiled here; pattern syntax and extraction arity
    /// problems are caught now, never at parse time. A new name appends at
    /// the end of the category table. An existing name is replaced at its
    /// current position, keeping its match priority, and the displaced
    /// definition is returned.
    pub fn register(
        &mut self,
        type_: TimelinessType,
        name: &FormatName_str,
        pattern: &FormatPattern_str,
        extraction: Extraction,
    ) -> RegistryResult<Option<FormatDefinition>> {
        defn!("({:?}, {:?}, {:?})", type_, name, pattern);
        let regex: Regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                defx!("return Err(Pattern)");
                return Err(RegistryError::Pattern {
                    name: name.to_string(),
                    source: err,
                });
            }
        };
        let groups: usize = regex.captures_len() - 1;
        match extraction {
            Extraction::Extractor { arity, .. } if arity != groups => {
                defx!("return Err(Arity); arity {} groups {}", arity, groups);
                return Err(RegistryError::Arity {
                    name: name.to_string(),
                    arity,
                    groups,
                });
            }
            Extraction::Composed {
                date_groups,
                time_groups,
                ..
            } if date_groups + time_groups > groups => {
                defx!("return Err(Arity); composed {}+{} groups {}", date_groups, time_groups, groups);
                return Err(RegistryError::Arity {
                    name: name.to_string(),
                    arity: date_groups + time_groups,
                    groups,
                });
            }
            _ => {}
        }
        let definition: FormatDefinition = FormatDefinition {
            name: name.to_string(),
            regex,
            extraction,
        };
        let table: &mut Vec<FormatDefinition> = self.table_mut(type_);
        let displaced: Option<FormatDefinition> =
            match table.iter().position(|prior| prior.name == name) {
                Some(index) => {
                    defo!("replacing {:?} at position {}", name, index);
                    Some(std::mem::replace(&mut table[index], definition))
                }
                None => {
                    table.push(definition);
                    None
                }
            };
        defx!("return Ok; displaced {}", displaced.is_some());
        Ok(displaced)
    }

    /// Build and register a datetime format under `name` from the
    /// registered date format `date_name` and time format `time_name`,
    /// their pattern sources joined by `separator`.
    ///
    /// The combined extraction applies the date side to the leading groups
    /// and the time side to the rest, landing hour/minute/second in slots
    /// 3–5. Returns the displaced definition like [`register`](Self::register).
    pub fn compose(
        &mut self,
        name: &FormatName_str,
        date_name: &FormatName_str,
        time_name: &FormatName_str,
        separator: &FormatPattern_str,
    ) -> RegistryResult<Option<FormatDefinition>> {
        defn!("({:?}, {:?}, {:?}, {:?})", name, date_name, time_name, separator);
        let (date_pattern, date_side, date_groups): (String, SideExtraction, usize) =
            self.compose_side(TimelinessType::Date, date_name)?;
        let (time_pattern, time_side, time_groups): (String, SideExtraction, usize) =
            self.compose_side(TimelinessType::Time, time_name)?;
        let pattern: String = format!("{}{}{}", date_pattern, separator, time_pattern);
        let extraction: Extraction = Extraction::Composed {
            date: date_side,
            date_groups,
            time: time_side,
            time_groups,
        };
        let displaced = self.register(TimelinessType::DateTime, name, &pattern, extraction);
        defx!();
        displaced
    }

    /// The pattern source, side extraction, and group count of one
    /// `compose` source format.
    fn compose_side(
        &self,
        type_: TimelinessType,
        name: &FormatName_str,
    ) -> RegistryResult<(String, SideExtraction, usize)> {
        let definition: &FormatDefinition = match self.find(type_, name) {
            Some(definition) => definition,
            None => {
                return Err(RegistryError::UnknownSource {
                    type_,
                    name: name.to_string(),
                })
            }
        };
        let side: SideExtraction = match definition.extraction {
            Extraction::Positional => SideExtraction::Positional,
            Extraction::Extractor { f, arity } => SideExtraction::Extractor { f, arity },
            // date and time categories never hold composed definitions
            Extraction::Composed { .. } => {
                return Err(RegistryError::UnknownSource {
                    type_,
                    name: name.to_string(),
                })
            }
        };
        let groups: usize = definition.regex.captures_len() - 1;
        Ok((definition.regex.as_str().to_string(), side, groups))
    }
}

lazy_static! {
    /// The shared default registry holding the built-in format tables.
    /// Never mutated; customization starts from a `.clone()`.
    pub static ref FORMAT_REGISTRY_DEFAULT: FormatRegistry = FormatRegistry::builtin().unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// the parse pipeline
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Match trimmed `text` against `formats` in order; extract components from
/// the first accepted match.
///
/// When `bounded`, a match must span the entire trimmed input or the format
/// is passed over. The first *matching* format decides the outcome: an
/// extraction failure on matched text propagates, it does not fall through
/// to later formats. `Err(ParseError::NoFormatMatch)` when no format
/// accepts the input.
pub fn extract_components(
    text: &str,
    formats: &[FormatDefinition],
    bounded: bool,
) -> ParseResult<ComponentArray> {
    defn!("({:?}, {} formats, bounded {})", text, formats.len(), bounded);
    let trimmed: &str = text.trim();
    for definition in formats.iter() {
        if let Some(components) = definition.extract(trimmed, bounded)? {
            defx!("return {:?}; matched format {:?}", components, definition.name);
            return Ok(components);
        }
    }
    defx!("return Err(NoFormatMatch)");
    Err(ParseError::NoFormatMatch(text.to_string()))
}

/// Parse `text` as a `type_` value: scan the registry's table for that type
/// ([`extract_components`]) then build the calendar-checked timestamp
/// ([`components_to_timestamp`]).
///
/// The single parse entry point; a `Timestamp` or the first failure.
pub fn string_to_timestamp(
    text: &str,
    type_: TimelinessType,
    bounded: bool,
    registry: &FormatRegistry,
) -> ParseResult<Timestamp> {
    defñ!("({:?}, {}, bounded {})", text, type_, bounded);
    let components: ComponentArray = extract_components(text, registry.definitions(type_), bounded)?;
    components_to_timestamp(&components, type_)
}
