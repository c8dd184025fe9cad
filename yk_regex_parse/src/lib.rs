/**
 * Normalization of lexer regexes: quantifier desugaring, explicit
 * concatenation, infix to postfix conversion and syntax-tree construction.
 */

mod error;
mod token;
mod normalize;
mod parser;
pub mod ast;

pub use error::RegexError;
pub use token::{
    Token, Symbol, Operator, EPSILON, CONCAT,
    tokenize, render, unescape, reserved_name, is_word_char,
};
pub use normalize::{
    Postfix, check_parentheses, validate_parentheses, desugar_quantifiers, transform_and_validate,
    insert_concatenation, insert_explicit_concatenation, shunting_yard, normalize, to_postfix,
};
pub use parser::{build, parse};
pub use ast::Node;
