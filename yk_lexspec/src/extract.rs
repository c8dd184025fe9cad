/**
 * Extraction of `let <identifier> = <regex>` definitions from cleaned
 * specification lines.
 */

use crate::definition::Definitions;
use crate::error::{DefinitionError, Fault, Stage};

pub const KEYWORD: &str = "let";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub definitions: Definitions,
    pub faults: Vec<Fault>,
}

pub fn extract_definitions<I, S>(lines: I) -> Extraction
    where I : IntoIterator<Item = S>, S : AsRef<str> {

    let mut result = Extraction::default();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let (identifier, regex) = match split_definition(line) {
            Some(parts) => parts,
            None => {
                if starts_with_keyword(line) {
                    log::warn!("line {}: ignoring malformed definition `{}`", index + 1, line);
                }
                continue;
            },
        };

        if !is_balanced(regex) {
            // The latest declaration wins, even when it is the faulty one
            result.definitions.remove(identifier);
            let error = DefinitionError::UnbalancedDefinition{ identifier: identifier.into() };
            log::warn!("line {}: {}", index + 1, error);
            result.faults.push(Fault::new(identifier, Stage::Extraction, error));
            continue;
        }

        if result.definitions.insert(identifier, regex).is_some() {
            log::warn!("line {}: `{}` is redefined, the earlier definition is overwritten", index + 1, identifier);
        }
    }
    log::debug!("extracted {} definition(s)", result.definitions.len());
    result
}

fn starts_with_keyword(line: &str) -> bool {
    match line.trim_start().strip_prefix(KEYWORD) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

fn split_definition(line: &str) -> Option<(&str, &str)> {
    if !starts_with_keyword(line) {
        return None;
    }
    let rest = line.trim_start().get(KEYWORD.len()..)?;
    let (identifier, regex) = rest.split_once('=')?;
    let identifier = identifier.trim();
    if is_identifier(identifier) {
        Some((identifier, regex.trim()))
    }
    else {
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Checks that brackets and parentheses nest properly. Inside single-quoted
/// literals they carry no meaning, and a backslash escapes the next character.
pub fn is_balanced(regex: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_literal = false;
    let mut chars = regex.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => { chars.next(); },
            '\'' => in_literal = !in_literal,
            _ if in_literal => { },
            '[' | '(' => stack.push(c),
            ']' => if stack.pop() != Some('[') {
                return false;
            },
            ')' => if stack.pop() != Some('(') {
                return false;
            },
            _ => { },
        }
    }
    stack.is_empty() && !in_literal
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod extract_tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn extracts_in_source_order() {
        let extraction = extract_definitions(vec![
            "let digit = ['0'-'9']",
            "let number = digit+",
            "rule tokens =",
            "number { return NUMBER }",
        ]);
        assert!(extraction.faults.is_empty());
        assert_eq!(extraction.definitions.iter().collect::<Vec<_>>(), vec![
            ("digit", "['0'-'9']"),
            ("number", "digit+"),
        ]);
    }

    #[test]
    fn splits_on_first_equals_only() {
        let extraction = extract_definitions(vec!["let eq = ['=']|a"]);
        assert_eq!(extraction.definitions.get("eq"), Some("['=']|a"));
    }

    #[test]
    fn unbalanced_definition_is_isolated() {
        let extraction = extract_definitions(vec![
            "let bad = (a|b",
            "let good = a|b",
        ]);
        assert_eq!(extraction.definitions.iter().collect::<Vec<_>>(), vec![("good", "a|b")]);
        assert_eq!(extraction.faults, vec![Fault::new(
            "bad",
            Stage::Extraction,
            DefinitionError::UnbalancedDefinition{ identifier: "bad".into() })]);
    }

    #[test]
    fn redeclaration_overwrites() {
        let extraction = extract_definitions(vec!["let a = x", "let b = y", "let a = z"]);
        assert_eq!(extraction.definitions.iter().collect::<Vec<_>>(), vec![("a", "z"), ("b", "y")]);
    }

    #[rstest]
    #[case("let = a")]
    #[case("let 1x = a")]
    #[case("let x a")]
    #[case("letter = a")]
    #[case("lets x = a")]
    fn ignores_lines_that_are_not_definitions(#[case] line: &str) {
        let extraction = extract_definitions(vec![line]);
        assert!(extraction.definitions.is_empty());
        assert!(extraction.faults.is_empty());
    }

    #[rstest]
    #[case("['a'-'z']", true)]
    #[case("(a|b)*", true)]
    #[case("['(']", true)]
    #[case("[')'']']", true)]
    #[case(r"['\'']", true)]
    #[case(r"\(a", true)]
    #[case("([a)]", false)]
    #[case("(a", false)]
    #[case("a)", false)]
    #[case("['a'", false)]
    #[case("'a", false)]
    fn balance(#[case] regex: &str, #[case] balanced: bool) {
        assert_eq!(is_balanced(regex), balanced);
    }
}
