// src/validators/timeliness.rs

//! The validator orchestration layer: wires the parse pipeline and
//! restriction evaluation to a record and an error sink.
//!
//! A [`TimelinessValidator`] is configured once per field (type, nil/blank
//! allowances, restrictions, optional custom registry, messages) and then
//! applied to any number of records with [`validate`]. The record side is
//! abstracted behind [`RecordMutate`] and failures are reported as fully
//! interpolated messages through an [`ErrorSink`]; persistence-framework
//! glue stays outside this crate.
//!
//! [`validate`]: TimelinessValidator#method.validate

use crate::common::TimelinessType;
use crate::data::datetime::{RawValue, Timestamp};
use crate::data::formats::{string_to_timestamp, FormatRegistry, FORMAT_REGISTRY_DEFAULT};
use crate::error::ParseResult;
use crate::validators::restriction::{
    evaluate_restrictions,
    Operand,
    RecordAccess,
    RestrictionOperator,
    RestrictionSpec,
    Violation,
};

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

/// Attribute mutation, needed by the validator on top of [`RecordAccess`]
/// to discard a raw value that failed to parse.
pub trait RecordMutate: RecordAccess {
    /// Clear attribute `name`.
    fn clear_attribute(&mut self, name: &str);
}

/// Receives one fully interpolated message per reported failure.
/// Message templating stays on this side of the boundary; the sink only
/// stores.
pub trait ErrorSink {
    fn add(&mut self, field: &str, message: String);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The per-validator message templates. `{}` interpolates one value:
/// the validation type for `invalid`, the comparison value for the
/// operator templates, the operator name for `unresolvable`; `blank`
/// interpolates nothing.
#[derive(Clone, Debug)]
pub struct MessageSet {
    pub blank: String,
    pub invalid: String,
    pub before: String,
    pub on_or_before: String,
    pub after: String,
    pub on_or_after: String,
    pub unresolvable: String,
}

impl Default for MessageSet {
    fn default() -> MessageSet {
        MessageSet {
            blank: String::from("can't be blank"),
            invalid: String::from("is not a valid {}"),
            before: String::from("must be before {}"),
            on_or_before: String::from("must be on or before {}"),
            after: String::from("must be after {}"),
            on_or_after: String::from("must be on or after {}"),
            unresolvable: String::from("restriction '{}' value was invalid"),
        }
    }
}

impl MessageSet {
    /// The violation template for `operator`.
    pub fn operator_template(
        &self,
        operator: RestrictionOperator,
    ) -> &str {
        match operator {
            RestrictionOperator::Before => &self.before,
            RestrictionOperator::OnOrBefore => &self.on_or_before,
            RestrictionOperator::After => &self.after,
            RestrictionOperator::OnOrAfter => &self.on_or_after,
        }
    }
}

/// Substitute the first `{}` of `template` with `value`.
fn interpolate(
    template: &str,
    value: &str,
) -> String {
    template.replacen("{}", value, 1)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// the validator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A configured per-field validator.
///
/// Build one with [`new`](Self::new) and the chainable setters, then call
/// [`validate`](Self::validate) per record. A validator without a custom
/// registry parses with the shared [`struct@FORMAT_REGISTRY_DEFAULT`];
/// a custom registry is this validator's own value, the default is never
/// mutated.
#[derive(Clone, Debug)]
pub struct TimelinessValidator {
    /// the validation type; decides the format table scanned and the
    /// comparison granularity
    pub type_: TimelinessType,
    /// skip validation when the attribute is absent
    pub allow_nil: bool,
    /// skip validation when the attribute is absent or blank text
    pub allow_blank: bool,
    /// evaluated in order after a successful parse
    pub restrictions: Vec<RestrictionSpec>,
    /// `None` parses with the shared default registry
    pub registry: Option<FormatRegistry>,
    pub messages: MessageSet,
}

impl TimelinessValidator {
    /// A validator for `type_`: no restrictions, nil and blank not
    /// allowed, default registry and messages.
    pub fn new(type_: TimelinessType) -> TimelinessValidator {
        TimelinessValidator {
            type_,
            allow_nil: false,
            allow_blank: false,
            restrictions: Vec::new(),
            registry: None,
            messages: MessageSet::default(),
        }
    }

    /// Skip validation of absent attributes.
    pub fn allow_nil(
        mut self,
        allow: bool,
    ) -> TimelinessValidator {
        self.allow_nil = allow;
        self
    }

    /// Skip validation of absent or blank attributes.
    pub fn allow_blank(
        mut self,
        allow: bool,
    ) -> TimelinessValidator {
        self.allow_blank = allow;
        self
    }

    /// Append one restriction; restrictions evaluate in the order added.
    pub fn restriction(
        mut self,
        operator: RestrictionOperator,
        operand: Operand,
    ) -> TimelinessValidator {
        self.restrictions.push(RestrictionSpec::new(operator, operand));
        self
    }

    /// Parse with `registry` instead of the shared default.
    pub fn registry(
        mut self,
        registry: FormatRegistry,
    ) -> TimelinessValidator {
        self.registry = Some(registry);
        self
    }

    /// Replace the message templates.
    pub fn messages(
        mut self,
        messages: MessageSet,
    ) -> TimelinessValidator {
        self.messages = messages;
        self
    }

    /// The registry this validator parses with.
    pub fn format_registry(&self) -> &FormatRegistry {
        match &self.registry {
            Some(registry) => registry,
            None => &FORMAT_REGISTRY_DEFAULT,
        }
    }

    /// Parse one raw value at this validator's type. Text parses bounded;
    /// an already-typed value passes through without re-parsing, reshaped
    /// to the validation type's granularity.
    pub fn parse(
        &self,
        value: &RawValue,
    ) -> ParseResult<Timestamp> {
        match value {
            RawValue::Value(timestamp) => Ok(timestamp.with_type(self.type_)),
            RawValue::Text(text) => {
                string_to_timestamp(text, self.type_, true, self.format_registry())
            }
        }
    }

    /// The fully interpolated message for one violation.
    pub fn message_for(
        &self,
        violation: &Violation,
    ) -> String {
        match violation {
            Violation::Failed { operator, compared } => interpolate(
                self.messages.operator_template(*operator),
                &compared.to_string(),
            ),
            Violation::Unresolvable { operator } => {
                interpolate(&self.messages.unresolvable, operator.as_str())
            }
        }
    }

    /// Validate attribute `field` of `record`, reporting each failure to
    /// `sink`.
    ///
    /// 1. absent attribute: skipped under `allow_nil` or `allow_blank`,
    ///    otherwise the blank message is reported;
    /// 2. blank text: skipped under `allow_blank`, otherwise the blank
    ///    message;
    /// 3. unparseable value: the attribute is cleared on the record and the
    ///    invalid message reported;
    /// 4. parsed value: restrictions evaluate in order, one message per
    ///    violation.
    pub fn validate<R, S>(
        &self,
        record: &mut R,
        field: &str,
        sink: &mut S,
    ) where
        R: RecordMutate,
        S: ErrorSink,
    {
        defn!("({:?}, {})", field, self.type_);
        let value: RawValue = match record.attribute(field) {
            Some(value) => value,
            None => {
                // an absent value is blank too, so either allowance skips
                if !(self.allow_nil || self.allow_blank) {
                    defo!("absent attribute; report blank");
                    sink.add(field, self.messages.blank.clone());
                }
                defx!("return; absent");
                return;
            }
        };
        if value.is_blank() {
            if !self.allow_blank {
                defo!("blank attribute; report blank");
                sink.add(field, self.messages.blank.clone());
            }
            defx!("return; blank");
            return;
        }
        let timestamp: Timestamp = match self.parse(&value) {
            Ok(timestamp) => timestamp,
            Err(_err) => {
                defo!("unparseable: {}", _err);
                record.clear_attribute(field);
                sink.add(
                    field,
                    interpolate(&self.messages.invalid, self.type_.as_str()),
                );
                defx!("return; unparseable");
                return;
            }
        };
        let violations: Vec<Violation> = evaluate_restrictions(
            &timestamp,
            &self.restrictions,
            &*record,
            self.type_,
            self.format_registry(),
        );
        for violation in violations.iter() {
            sink.add(field, self.message_for(violation));
        }
        defx!("return; {} violations", violations.len());
    }
}
