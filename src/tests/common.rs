// src/tests/common.rs

//! Common helpers for tests: chrono value constructors and in-memory
//! stand-ins for the record and error-sink traits.

#![allow(non_snake_case)]

use crate::common::Component;
use crate::data::datetime::{
    DateTimeT,
    RawValue,
};
use crate::validators::restriction::RecordAccess;
use crate::validators::timeliness::{
    ErrorSink,
    RecordMutate,
};

use std::collections::HashMap;

use ::chrono::{
    NaiveDate,
    NaiveTime,
};

/// `NaiveDate` from year, month, day. Only for tests with known-good values.
pub fn ymd(
    year: Component,
    month: u32,
    day: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// `NaiveTime` from hour, minute, second. Only for tests with known-good
/// values.
pub fn hms(
    hour: u32,
    minute: u32,
    second: u32,
) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap()
}

/// `NaiveDateTime` from year, month, day, hour, minute, second. Only for
/// tests with known-good values.
pub fn ymdhms(
    year: Component,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTimeT {
    ymd(year, month, day).and_time(hms(hour, minute, second))
}

/// An in-memory record; a `HashMap` of attribute name to [`RawValue`].
///
/// [`RawValue`]: crate::data::datetime::RawValue
#[derive(Clone, Debug, Default)]
pub struct TestRecord {
    attributes: HashMap<String, RawValue>,
}

impl TestRecord {
    pub fn new() -> TestRecord {
        TestRecord {
            attributes: HashMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with<V: Into<RawValue>>(
        mut self,
        name: &str,
        value: V,
    ) -> TestRecord {
        self.attributes
            .insert(String::from(name), value.into());

        self
    }

    pub fn has(
        &self,
        name: &str,
    ) -> bool {
        self.attributes.contains_key(name)
    }
}

impl RecordAccess for TestRecord {
    fn attribute(
        &self,
        name: &str,
    ) -> Option<RawValue> {
        self.attributes.get(name).cloned()
    }
}

impl RecordMutate for TestRecord {
    fn clear_attribute(
        &mut self,
        name: &str,
    ) {
        self.attributes.remove(name);
    }
}

/// An [`ErrorSink`] that collects `(field, message)` pairs.
///
/// [`ErrorSink`]: crate::validators::timeliness::ErrorSink
#[derive(Clone, Debug, Default)]
pub struct MessageCollector {
    pub messages: Vec<(String, String)>,
}

impl MessageCollector {
    pub fn new() -> MessageCollector {
        MessageCollector {
            messages: Vec::new(),
        }
    }

    /// All collected messages for `field`, in insertion order.
    pub fn messages_for(
        &self,
        field: &str,
    ) -> Vec<String> {
        self.messages
            .iter()
            .filter(|(field_, _)| field_ == field)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl ErrorSink for MessageCollector {
    fn add(
        &mut self,
        field: &str,
        message: String,
    ) {
        self.messages
            .push((String::from(field), message));
    }
}
