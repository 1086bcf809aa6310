// src/validators/mod.rs

//! The `validators` module is the validation layer over the parsing engine
//! in [`data`].
//!
//! Overview of validators:
//!
//! - [`restriction`]: restriction specs ([`RestrictionSpec`]), operand
//!   resolution against a record ([`Operand`]), and evaluation to
//!   [`Violation`] values.
//! - [`timeliness`]: the per-field [`TimelinessValidator`]; nil/blank
//!   handling, bounded parsing, restriction evaluation, message
//!   interpolation through an [`ErrorSink`].
//!
//! Records are abstracted behind the [`RecordAccess`] and [`RecordMutate`]
//! traits; this crate never couples to a persistence framework.
//!
//! [`data`]: crate::data
//! [`RestrictionSpec`]: crate::validators::restriction::RestrictionSpec
//! [`Operand`]: crate::validators::restriction::Operand
//! [`Violation`]: crate::validators::restriction::Violation
//! [`TimelinessValidator`]: crate::validators::timeliness::TimelinessValidator
//! [`ErrorSink`]: crate::validators::timeliness::ErrorSink
//! [`RecordAccess`]: crate::validators::restriction::RecordAccess
//! [`RecordMutate`]: crate::validators::timeliness::RecordMutate

pub mod restriction;
pub mod timeliness;
