// src/common.rs

//! Common types used throughout _timelinesslib_.
//!
//! Lives in a separate module to avoid circular imports between the
//! `data` and `validators` modules.

use std::fmt;

/// A _Year_ in a date.
pub type Year = i32;

/// One numeric field of a partially-decomposed date or time; a year, a month
/// number, an hour, etc.
pub type Component = i32;

/// An optional [`Component`].
pub type ComponentOpt = Option<Component>;

/// Number of slots in a [`ComponentArray`].
pub const COMPONENT_COUNT: usize = 6;

/// The decomposed form of a matched date/time string, six slots ordered
/// `[year, month, day, hour, minute, second]`.
///
/// Extraction fills slots from the front, positionally. Slots the matched
/// format captured no value for remain `None`; the value `0` is never used
/// as a stand-in for "absent". How slot positions are reinterpreted for the
/// requested [`TimelinessType`] is decided later, by
/// [`components_to_timestamp`].
///
/// [`components_to_timestamp`]: crate::data::datetime::components_to_timestamp
pub type ComponentArray = [ComponentOpt; COMPONENT_COUNT];

/// A [`ComponentArray`] with every slot unset.
pub const COMPONENTS_EMPTY: ComponentArray = [None; COMPONENT_COUNT];

/// [`ComponentArray`] index of the year slot.
pub const CI_YEAR: usize = 0;
/// [`ComponentArray`] index of the month slot.
pub const CI_MONTH: usize = 1;
/// [`ComponentArray`] index of the day slot.
pub const CI_DAY: usize = 2;
/// [`ComponentArray`] index of the hour slot.
pub const CI_HOUR: usize = 3;
/// [`ComponentArray`] index of the minute slot.
pub const CI_MINUTE: usize = 4;
/// [`ComponentArray`] index of the second slot.
pub const CI_SECOND: usize = 5;

/// The kind of value being parsed or validated.
///
/// Decides which format table the matcher scans, how [`ComponentArray`]
/// slots are reshaped into a timestamp, and at what granularity restriction
/// comparisons happen.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimelinessType {
    /// a time of day; anchored to the dummy date for comparison
    Time,
    /// a calendar date
    Date,
    /// a full date and time
    DateTime,
}

impl TimelinessType {
    /// Name as it appears in user-facing messages.
    pub const fn as_str(&self) -> &'static str {
        match *self {
            TimelinessType::Time => "time",
            TimelinessType::Date => "date",
            TimelinessType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for TimelinessType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
