/**
 * Faults of regex normalization and tree construction.
 */

use thiserror::Error;

/// Positions are token indices into the regex being processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    #[error("unbalanced parentheses at token {position}")]
    ParenMismatch{ position: usize },

    #[error("quantifier `{quantifier}` at token {position} has no operand")]
    InvalidQuantifierPlacement{ quantifier: char, position: usize },

    #[error("malformed postfix expression: {remaining} node(s) on the stack at token {position}")]
    StackIntegrity{ position: usize, remaining: usize },
}
