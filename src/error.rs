// src/error.rs

//! Error types for _timelinesslib_.
//!
//! Two boundaries, two enums:
//! - [`RegistryError`] for mistakes building a [`FormatRegistry`]; caught
//!   when a format is registered, never at parse time.
//! - [`ParseError`] for a string that could not become a [`Timestamp`].
//!   Callers usually only care that parsing failed; the variants keep the
//!   distinct causes inspectable for diagnostics.
//!
//! Failed restriction checks are not errors; see [`Violation`].
//!
//! [`FormatRegistry`]: crate::data::formats::FormatRegistry
//! [`Timestamp`]: crate::data::datetime::Timestamp
//! [`Violation`]: crate::validators::restriction::Violation

use crate::common::{Component, TimelinessType};

use std::num::ParseIntError;

extern crate regex;

extern crate thiserror;
use thiserror::Error;

/// A mistake in a format definition, reported by
/// [`FormatRegistry::register`] and [`FormatRegistry::compose`].
///
/// [`FormatRegistry::register`]: crate::data::formats::FormatRegistry#method.register
/// [`FormatRegistry::compose`]: crate::data::formats::FormatRegistry#method.compose
#[derive(Debug, Error)]
pub enum RegistryError {
    /// the pattern was rejected by the regex compiler
    #[error("format {name:?} pattern does not compile: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    /// the extractor expects a different number of captured groups than the
    /// pattern produces
    #[error("format {name:?} extractor takes {arity} captures but the pattern has {groups} groups")]
    Arity {
        name: String,
        arity: usize,
        groups: usize,
    },
    /// `compose` named a date or time format that is not registered
    #[error("cannot compose: no {type_} format named {name:?}")]
    UnknownSource {
        type_: TimelinessType,
        name: String,
    },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Why a value could not be parsed into a [`Timestamp`].
///
/// [`NoFormatMatch`] and [`Calendar`] are the two outcomes reachable through
/// the built-in format tables; the token variants arise from extractors
/// handed unexpected capture text.
///
/// [`Timestamp`]: crate::data::datetime::Timestamp
/// [`NoFormatMatch`]: ParseError::NoFormatMatch
/// [`Calendar`]: ParseError::Calendar
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// no format accepted the input; under a bounded match this includes
    /// patterns that matched a substring but left unmatched text around it
    #[error("no format matched {0:?}")]
    NoFormatMatch(String),
    /// a captured token failed integer conversion
    #[error("malformed number {0:?}")]
    Numeric(String, #[source] ParseIntError),
    /// a meridian token other than `"am"`/`"pm"` (any punctuation, any case)
    #[error("unrecognized meridian {0:?}")]
    Meridian(String),
    /// a month-name token that is not an English month name
    #[error("unrecognized month name {0:?}")]
    MonthName(String),
    /// a format with an extractor matched, but one of the capture groups the
    /// extractor needs did not participate in the match
    #[error("format {name:?} capture group {index} is empty")]
    EmptyCapture {
        name: String,
        index: usize,
    },
    /// the date part was incomplete after reshaping for the requested type
    #[error("missing {0} component")]
    Missing(&'static str),
    /// the resolved fields do not form a real calendar date/time
    #[error("calendar-invalid fields {y:04}-{m:02}-{d:02} {h:02}:{n:02}:{s:02}")]
    Calendar {
        y: Component,
        m: Component,
        d: Component,
        h: Component,
        n: Component,
        s: Component,
    },
}

impl ParseError {
    /// Returns `true` if the input matched a format but named an impossible
    /// date or time.
    #[inline(always)]
    pub const fn is_calendar(&self) -> bool {
        matches!(*self, ParseError::Calendar { .. })
    }

    /// Returns `true` if no registered format accepted the input.
    #[inline(always)]
    pub const fn is_no_format_match(&self) -> bool {
        matches!(*self, ParseError::NoFormatMatch(_))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
