// src/data/mod.rs

//! The `data` module is the parsing engine: format definitions and the
//! datetime component machinery.
//!
//! ## Definitions of data
//!
//! ### Component
//!
//! A "component" is one numeric field of a decomposed date or time; a year,
//! a month number, an hour. Extraction produces a six-slot [`ComponentArray`]
//! ordered `[year, month, day, hour, minute, second]`.
//!
//! ### Format
//!
//! A "format" is one accepted textual shape of a date, time, or datetime
//! value: a named pattern with an optional extractor, represented by a
//! [`FormatDefinition`]. Formats are held in a [`FormatRegistry`] in
//! match-priority order.
//!
//! ### Timestamp
//!
//! A [`Timestamp`] is the fully-resolved, calendar-valid result of parsing;
//! a date, a time of day anchored to the [dummy date], or a full datetime.
//!
//! The flow: raw string → [`extract_components`] (using a `FormatRegistry`)
//! → `ComponentArray` → [`components_to_timestamp`] → `Timestamp`.
//! [`string_to_timestamp`] runs the whole flow.
//!
//! [`ComponentArray`]: crate::common::ComponentArray
//! [`FormatDefinition`]: crate::data::formats::FormatDefinition
//! [`FormatRegistry`]: crate::data::formats::FormatRegistry
//! [`Timestamp`]: crate::data::datetime::Timestamp
//! [dummy date]: static@crate::data::datetime::DUMMY_DATE
//! [`extract_components`]: crate::data::formats::extract_components
//! [`components_to_timestamp`]: crate::data::datetime::components_to_timestamp
//! [`string_to_timestamp`]: crate::data::formats::string_to_timestamp

pub mod datetime;
pub mod formats;
