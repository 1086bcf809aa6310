// src/lib.rs

//! _timelinesslib_ parses loosely-formatted date, time, and datetime
//! strings against prioritized format tables and validates the parsed
//! values against relational restrictions.
//!
//! The most relevant items are:
//! - [`FormatRegistry`] and the built-in format tables
//! - [`string_to_timestamp`], the parse pipeline
//! - [`Timestamp`], the calendar-checked parse result
//! - [`evaluate_restrictions`] and [`TimelinessValidator`]
//!
//! [`FormatRegistry`]: crate::data::formats::FormatRegistry
//! [`string_to_timestamp`]: crate::data::formats::string_to_timestamp
//! [`Timestamp`]: crate::data::datetime::Timestamp
//! [`evaluate_restrictions`]: crate::validators::restriction::evaluate_restrictions
//! [`TimelinessValidator`]: crate::validators::timeliness::TimelinessValidator

pub mod common;
pub mod data;
pub mod error;
pub mod validators;
#[cfg(test)]
pub mod tests;
