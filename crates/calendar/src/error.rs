//! Error types for the horae-calendar crate.

use crate::kind::CalendarKind;

/// Error type for all fallible operations in the horae-calendar crate.
///
/// Every operation in this crate is a pure computation, so a given input
/// always fails with the same variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a rational value is built with a non-positive denominator.
    #[error("invalid rational: {numerator}/{denominator} (denominator must be > 0)")]
    InvalidRational {
        /// Numerator that was provided.
        numerator: i64,
        /// Offending denominator.
        denominator: i64,
    },

    /// Returned when an exact result does not fit the 64-bit representation.
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Name of the operation that overflowed.
        operation: &'static str,
    },

    /// Returned when a calendar kind code or name is not a built-in kind.
    #[error("invalid calendar type: {value}")]
    InvalidCalendarType {
        /// The unrecognised code, name, or kind.
        value: String,
    },

    /// Returned when custom calendar rules are rejected at construction.
    #[error("invalid calendar parameters: {reason}")]
    InvalidCalendarParameters {
        /// Which rule was violated.
        reason: String,
    },

    /// Returned when a date is not valid in the calendar it is converted with.
    #[error("invalid date: {reason}")]
    InvalidDate {
        /// Why the date was rejected.
        reason: String,
    },

    /// Returned when an operation does not apply to the calendar kind.
    #[error("invalid operation for {kind} calendar: {reason}")]
    InvalidOperation {
        /// Kind of the calendar the operation was attempted on.
        kind: CalendarKind,
        /// What was attempted.
        reason: String,
    },

    /// Returned by `Calendar::validate` when the rule table is inconsistent.
    #[error("invalid calendar state: {reason}")]
    InvalidCalendarState {
        /// The invariant that failed.
        reason: String,
    },

    /// Returned when a persisted calendar cannot be encoded or decoded.
    #[error("calendar persistence failed: {reason}")]
    Persistence {
        /// Message from the codec.
        reason: String,
    },
}

impl CalendarError {
    pub(crate) fn overflow(operation: &'static str) -> Self {
        Self::ArithmeticOverflow { operation }
    }

    pub(crate) fn invalid_date(reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            reason: reason.into(),
        }
    }
}
