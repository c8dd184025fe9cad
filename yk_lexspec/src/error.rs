/**
 * Per-definition faults.
 */

use std::fmt;
use thiserror::Error;
use yk_regex_parse::RegexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extraction,
    Substitution,
    Normalization,
    TreeBuilding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Extraction => "extraction",
            Stage::Substitution => "substitution",
            Stage::Normalization => "normalization",
            Stage::TreeBuilding => "tree building",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("unbalanced brackets, parentheses or quotes in `{identifier}`")]
    UnbalancedDefinition{ identifier: String },

    #[error("`{identifier}` does not reach a fixed point, it is part of or depends on a reference cycle")]
    CyclicDefinition{ identifier: String },

    #[error(transparent)]
    Regex(#[from] RegexError),
}

/// A fault of one definition. Faults never stop the other definitions from
/// being processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} of `{identifier}` failed: {error}")]
pub struct Fault {
    pub identifier: String,
    pub stage: Stage,
    pub error: DefinitionError,
}

impl Fault {
    pub fn new<E>(identifier: &str, stage: Stage, error: E) -> Self where E : Into<DefinitionError> {
        Self{ identifier: identifier.into(), stage, error: error.into() }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn fault_names_stage_and_identifier() {
        let fault = Fault::new("digit", Stage::Normalization, RegexError::ParenMismatch{ position: 2 });
        assert_eq!(
            fault.to_string(),
            "normalization of `digit` failed: unbalanced parentheses at token 2");
    }
}
