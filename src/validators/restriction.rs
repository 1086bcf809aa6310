// src/validators/restriction.rs

//! Restrictions: relational constraints a parsed value must satisfy
//! against dynamically resolved comparison operands.
//!
//! A [`RestrictionSpec`] pairs a [`RestrictionOperator`] with an
//! [`Operand`]. At evaluation time each operand resolves to a
//! [`Timestamp`]: a concrete value as-is, a named accessor or derivation
//! against the record under validation, or raw text pushed through the
//! parse pipeline (unbounded, so a restriction written in prose still
//! resolves). Both sides are then reshaped to the comparison granularity
//! of the validation type and the operator applied.
//!
//! Failed checks are *values*, not errors: [`evaluate_restrictions`]
//! always runs every restriction and returns all [`Violation`]s. An
//! operand that cannot resolve produces [`Violation::Unresolvable`] scoped
//! to that one restriction; the rest still evaluate.
//!
//! [`Timestamp`]: crate::data::datetime::Timestamp

use crate::common::TimelinessType;
use crate::data::datetime::{DateTimeT, RawValue, Timestamp};
use crate::data::formats::{string_to_timestamp, FormatRegistry};

use std::fmt;

extern crate chrono;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

/// Named-accessor lookup on the record under validation. This is all
/// restriction evaluation requires of a record.
pub trait RecordAccess {
    /// The raw value of attribute `name`; `None` when the record holds no
    /// value for it.
    fn attribute(&self, name: &str) -> Option<RawValue>;
}

/// Signature of a derived operand: computes a value from the record under
/// validation.
pub type DerivedFn = fn(&dyn RecordAccess) -> Option<RawValue>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// operators and operands
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The relational check a validated value must pass against a resolved
/// operand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RestrictionOperator {
    /// strictly less than the operand
    Before,
    /// strictly greater than the operand
    After,
    /// less than or equal to the operand
    OnOrBefore,
    /// greater than or equal to the operand
    OnOrAfter,
}

impl RestrictionOperator {
    /// Name as it appears in configuration and messages.
    pub const fn as_str(&self) -> &'static str {
        match *self {
            RestrictionOperator::Before => "before",
            RestrictionOperator::After => "after",
            RestrictionOperator::OnOrBefore => "on_or_before",
            RestrictionOperator::OnOrAfter => "on_or_after",
        }
    }

    /// Apply the relational check; `value` is the validated side.
    pub fn compare(
        &self,
        value: &DateTimeT,
        operand: &DateTimeT,
    ) -> bool {
        match *self {
            RestrictionOperator::Before => value < operand,
            RestrictionOperator::After => value > operand,
            RestrictionOperator::OnOrBefore => value <= operand,
            RestrictionOperator::OnOrAfter => value >= operand,
        }
    }
}

impl fmt::Display for RestrictionOperator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a restriction's comparison value is produced at evaluation time.
/// One case per resolution strategy, matched exhaustively.
#[derive(Clone, Debug)]
pub enum Operand {
    /// a concrete value, used as-is
    Value(Timestamp),
    /// the named accessor, invoked on the record under validation
    Attribute(String),
    /// computed from the record under validation
    Derived(DerivedFn),
    /// raw text parsed through the format registry, unbounded
    Text(String),
}

impl Operand {
    /// Resolve to a timestamp against `record`.
    ///
    /// `None` when no comparable value can be produced: the accessor or
    /// derivation returned nothing, or text failed to parse.
    pub fn resolve(
        &self,
        record: &dyn RecordAccess,
        type_: TimelinessType,
        registry: &FormatRegistry,
    ) -> Option<Timestamp> {
        match self {
            Operand::Value(timestamp) => Some(*timestamp),
            Operand::Attribute(name) => {
                let value: RawValue = record.attribute(name)?;
                raw_value_to_timestamp(&value, type_, registry)
            }
            Operand::Derived(f) => {
                let value: RawValue = f(record)?;
                raw_value_to_timestamp(&value, type_, registry)
            }
            Operand::Text(text) => match string_to_timestamp(text, type_, false, registry) {
                Ok(timestamp) => Some(timestamp),
                Err(_err) => {
                    defo!("operand text {:?} did not parse: {}", text, _err);
                    None
                }
            },
        }
    }
}

impl From<Timestamp> for Operand {
    fn from(timestamp: Timestamp) -> Operand {
        Operand::Value(timestamp)
    }
}

impl From<NaiveDate> for Operand {
    fn from(date: NaiveDate) -> Operand {
        Operand::Value(Timestamp::Date(date))
    }
}

impl From<NaiveTime> for Operand {
    fn from(time: NaiveTime) -> Operand {
        Operand::Value(Timestamp::Time(time))
    }
}

impl From<NaiveDateTime> for Operand {
    fn from(dt: NaiveDateTime) -> Operand {
        Operand::Value(Timestamp::DateTime(dt))
    }
}

impl From<&str> for Operand {
    fn from(text: &str) -> Operand {
        Operand::Text(text.to_string())
    }
}

impl From<String> for Operand {
    fn from(text: String) -> Operand {
        Operand::Text(text)
    }
}

/// An already-typed value passes through as-is; text goes through the
/// parse pipeline unbounded.
fn raw_value_to_timestamp(
    value: &RawValue,
    type_: TimelinessType,
    registry: &FormatRegistry,
) -> Option<Timestamp> {
    match value {
        RawValue::Value(timestamp) => Some(*timestamp),
        RawValue::Text(text) => match string_to_timestamp(text, type_, false, registry) {
            Ok(timestamp) => Some(timestamp),
            Err(_err) => {
                defo!("record value {:?} did not parse: {}", text, _err);
                None
            }
        },
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// evaluation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One configured restriction. Built once from validation configuration,
/// evaluated per record, never mutated.
#[derive(Clone, Debug)]
pub struct RestrictionSpec {
    pub operator: RestrictionOperator,
    pub operand: Operand,
}

impl RestrictionSpec {
    pub fn new(
        operator: RestrictionOperator,
        operand: Operand,
    ) -> RestrictionSpec {
        RestrictionSpec { operator, operand }
    }
}

/// One failed restriction. A value, not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// the comparison ran and the value failed the relational check;
    /// `compared` is the operand resolved and reshaped to comparison
    /// granularity, ready for message interpolation
    Failed {
        operator: RestrictionOperator,
        compared: Timestamp,
    },
    /// the operand could not be resolved to a comparable value
    Unresolvable { operator: RestrictionOperator },
}

impl Violation {
    /// The operator of the restriction this violation belongs to.
    pub const fn operator(&self) -> RestrictionOperator {
        match *self {
            Violation::Failed { operator, .. } => operator,
            Violation::Unresolvable { operator } => operator,
        }
    }

    /// Returns `true` if this is a `Violation::Unresolvable`.
    #[inline(always)]
    pub const fn is_unresolvable(&self) -> bool {
        matches!(*self, Violation::Unresolvable { .. })
    }
}

/// Evaluate `restrictions` in order against the already-parsed `value`.
///
/// Both sides of every comparison are first reshaped to the granularity of
/// `type_` ([`Timestamp::to_comparable`]); a date under a datetime
/// comparison contributes midnight, a time contributes the dummy date.
/// An operand that fails to resolve yields [`Violation::Unresolvable`] for
/// that restriction and evaluation continues with the next one.
///
/// [`Timestamp::to_comparable`]: crate::data::datetime::Timestamp#method.to_comparable
pub fn evaluate_restrictions(
    value: &Timestamp,
    restrictions: &[RestrictionSpec],
    record: &dyn RecordAccess,
    type_: TimelinessType,
    registry: &FormatRegistry,
) -> Vec<Violation> {
    defn!("({}, {} restrictions, {})", value, restrictions.len(), type_);
    let value_cmp: DateTimeT = value.to_comparable(type_);
    let mut violations: Vec<Violation> = Vec::new();
    for spec in restrictions.iter() {
        let resolved: Timestamp = match spec.operand.resolve(record, type_, registry) {
            Some(resolved) => resolved,
            None => {
                defo!("operand of {:?} is unresolvable", spec.operator);
                violations.push(Violation::Unresolvable {
                    operator: spec.operator,
                });
                continue;
            }
        };
        let operand_cmp: DateTimeT = resolved.to_comparable(type_);
        if !spec.operator.compare(&value_cmp, &operand_cmp) {
            defo!("violated {:?} {:?}", spec.operator, operand_cmp);
            violations.push(Violation::Failed {
                operator: spec.operator,
                compared: resolved.with_type(type_),
            });
        }
    }
    defx!("return {} violations", violations.len());
    violations
}
