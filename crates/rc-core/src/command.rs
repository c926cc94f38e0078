//! A pending binary operation.

use tracing::trace;

use crate::arithmetic::{self, Operator};
use crate::config::CalcConfig;
use crate::error::CalcError;
use crate::value::Value;

/// An operator waiting for its right operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    op: Operator,
    left: Value,
    /// Set after a bare `=` reused the left operand as the right one.
    repeating: bool,
}

impl Command {
    pub const fn new(op: Operator, left: Value) -> Self {
        Self {
            op,
            left,
            repeating: false,
        }
    }

    pub const fn operator(&self) -> Operator {
        self.op
    }

    pub const fn left(&self) -> &Value {
        &self.left
    }

    pub const fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Replaces the operator, keeping the left operand.
    pub const fn retarget(&mut self, op: Operator) {
        self.op = op;
    }

    /// `+` and `×` on plain numbers repeat on bare `=`.
    pub const fn can_repeat(&self) -> bool {
        self.op.is_repeatable() && self.left.can_repeat_commands()
    }

    pub const fn symbol(&self) -> char {
        self.op.symbol()
    }

    /// Runs `left op right`.
    ///
    /// With an empty right operand the command only runs if it can repeat;
    /// `Ok(None)` means nothing happened. The first repetition, before any
    /// calculation has executed, uses the left operand on both sides
    /// (`3 + =` gives 6).
    pub fn execute(
        &mut self,
        right: &Value,
        calculation_executed: bool,
        config: &CalcConfig,
    ) -> Result<Option<Value>, CalcError> {
        if !right.contains_value() && !self.can_repeat() {
            return Ok(None);
        }
        let doubling = !right.contains_value() && !calculation_executed;
        let right = if doubling { &self.left } else { right };

        let result = arithmetic::apply(self.op, &self.left, right, config)?;
        trace!(
            op = %self.op,
            left = self.left.display(),
            right = right.display(),
            result = result.display(),
            "executed"
        );
        if doubling {
            self.repeating = true;
        }
        Ok(Some(result))
    }
}
