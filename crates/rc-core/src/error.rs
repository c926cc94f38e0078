//! Error types for the value engine.
//!
//! Nothing here is fatal: every error leaves the value or session exactly as
//! it was before the failing call, and the caller signals it to the user.

use thiserror::Error;

use crate::arithmetic::Operator;
use crate::value::ValueKind;

/// Errors returned by value mutations, arithmetic, and session keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The key is not valid in the current state.
    #[error("input rejected: {reason}")]
    InputRejected { reason: &'static str },

    /// A mode key cannot convert the current value.
    #[error("cannot change {from} into {to}")]
    ModeTransitionRefused { from: ValueKind, to: ValueKind },

    /// No arithmetic is defined for this operand combination.
    #[error("{left} {op} {right} is undefined")]
    OperationUndefined {
        op: Operator,
        left: ValueKind,
        right: ValueKind,
    },

    /// The result does not fit the display.
    #[error("overflow: {reason}")]
    Overflow { reason: &'static str },

    /// An interval would run backwards.
    #[error("end is before start")]
    NegativeInterval,

    /// The key needs a pending operator.
    #[error("no pending operation")]
    NothingPending,
}

/// Coarse error categories shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A keypress was invalid and has been rolled back.
    InputRejected,
    /// An arithmetic request has no result.
    OperationUndefined,
    /// A mode key was pressed on a value that cannot convert.
    ModeTransitionRefused,
}

impl CalcError {
    /// Maps the error onto the category the user sees.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InputRejected { .. } | Self::NothingPending => ErrorKind::InputRejected,
            Self::ModeTransitionRefused { .. } => ErrorKind::ModeTransitionRefused,
            Self::OperationUndefined { .. } | Self::Overflow { .. } | Self::NegativeInterval => {
                ErrorKind::OperationUndefined
            }
        }
    }

    pub(crate) const fn rejected(reason: &'static str) -> Self {
        Self::InputRejected { reason }
    }

    pub(crate) const fn overflow(reason: &'static str) -> Self {
        Self::Overflow { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            CalcError::rejected("x").kind(),
            ErrorKind::InputRejected
        );
        assert_eq!(CalcError::NothingPending.kind(), ErrorKind::InputRejected);
        assert_eq!(
            CalcError::overflow("x").kind(),
            ErrorKind::OperationUndefined
        );
        assert_eq!(
            CalcError::NegativeInterval.kind(),
            ErrorKind::OperationUndefined
        );
        assert_eq!(
            CalcError::ModeTransitionRefused {
                from: ValueKind::Date,
                to: ValueKind::ElapsedTime,
            }
            .kind(),
            ErrorKind::ModeTransitionRefused
        );
    }

    #[test]
    fn messages_name_operands() {
        let err = CalcError::OperationUndefined {
            op: Operator::Multiply,
            left: ValueKind::TimeOfDay,
            right: ValueKind::Decimal,
        };
        assert_eq!(err.to_string(), "time of day × decimal is undefined");
    }
}
