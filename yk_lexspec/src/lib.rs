/**
 * The front end of the lexer generator: turns the `let` definitions of a
 * lexical specification into self-contained regexes, then into postfix
 * form and syntax trees.
 *
 * Input lines are expected to be cleaned already (no block comments, no
 * blank lines).
 */

extern crate yk_regex_parse;

mod config;
mod error;
mod definition;
mod extract;
mod char_class;
mod substitute;
mod pipeline;

pub use config::Config;
pub use error::{DefinitionError, Fault, Stage};
pub use definition::Definitions;
pub use extract::{extract_definitions, is_balanced, Extraction, KEYWORD};
pub use char_class::{classify, convert_regex, desugar_definitions, ClassForm};
pub use substitute::{references, substitute_definitions, substitution_pass};
pub use pipeline::{compile_definition, compile_spec, Compiled, Report};
