/**
 * The whole front end: extraction, class desugaring, substitution, then
 * normalization and tree building for every definition on its own.
 */

use yk_regex_parse::{build, to_postfix, Node, Postfix};
use crate::char_class::desugar_definitions;
use crate::config::Config;
use crate::error::{Fault, Stage};
use crate::extract::{extract_definitions, Extraction};
use crate::substitute::substitute_definitions;

/// A definition ready for automaton construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub identifier: String,
    /// The self-contained infix regex the postfix form was built from.
    pub regex: String,
    pub postfix: Postfix,
    pub tree: Node,
}

/// Successes and faults of a whole specification. Both lists follow source
/// order within their own stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub compiled: Vec<Compiled>,
    pub faults: Vec<Fault>,
}

impl Report {
    pub fn get(&self, identifier: &str) -> Option<&Compiled> {
        self.compiled.iter().find(|c| c.identifier == identifier)
    }

    pub fn fault(&self, identifier: &str) -> Option<&Fault> {
        self.faults.iter().find(|f| f.identifier == identifier)
    }

    pub fn is_ok(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Normalizes one finalized definition. Nothing here depends on other
/// definitions, so separate definitions can be compiled in parallel.
pub fn compile_definition(identifier: &str, regex: &str) -> Result<Compiled, Fault> {
    let postfix = to_postfix(regex).map_err(|e| Fault::new(identifier, Stage::Normalization, e))?;
    let tree = build(postfix.clone()).map_err(|e| Fault::new(identifier, Stage::TreeBuilding, e))?;
    Ok(Compiled{ identifier: identifier.into(), regex: regex.into(), postfix, tree })
}

pub fn compile_spec<I, S>(lines: I, config: &Config) -> Report
    where I : IntoIterator<Item = S>, S : AsRef<str> {

    let Extraction{ mut definitions, mut faults } = extract_definitions(lines);
    desugar_definitions(&mut definitions);
    // Substitution has to finish before anything is normalized
    faults.extend(substitute_definitions(&mut definitions, config));

    let mut compiled = Vec::with_capacity(definitions.len());
    for (identifier, regex) in definitions.iter() {
        match compile_definition(identifier, regex) {
            Ok(result) => {
                log::debug!("`{}` => {}", identifier, result.postfix);
                compiled.push(result);
            },
            Err(fault) => {
                log::warn!("{}", fault);
                faults.push(fault);
            },
        }
    }
    Report{ compiled, faults }
}

// Tests ///////////////////////////////////////////////////////////////////////
