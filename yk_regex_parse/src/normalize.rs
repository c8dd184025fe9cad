/**
 * Regex normalization stages. Each stage is a precondition of the next:
 *
 *  1. parenthesis validation
 *  2. quantifier desugaring (`+` and `?` rewritten in terms of `*`, `|`, `ϵ`)
 *  3. explicit concatenation insertion
 *  4. infix to postfix conversion (shunting-yard)
 */

use std::fmt;
use crate::error::RegexError;
use crate::token::{tokenize, render, Operator, Symbol, Token};

/// A regex in postfix (reverse polish) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.0
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}

/**
 * Parenthesis validation.
 */

pub fn check_parentheses(tokens: &[Token]) -> Result<(), RegexError> {
    let mut depth = 0usize;
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                if depth == 0 {
                    return Err(RegexError::ParenMismatch{ position });
                }
                depth -= 1;
            },
            _ => { },
        }
    }
    if depth == 0 {
        Ok(())
    }
    else {
        Err(RegexError::ParenMismatch{ position: tokens.len() })
    }
}

pub fn validate_parentheses(regex: &str) -> bool {
    check_parentheses(&tokenize(regex)).is_ok()
}

/**
 * Quantifier desugaring.
 */

pub fn desugar_quantifiers(tokens: &[Token]) -> Result<Vec<Token>, RegexError> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Operator(op) if op.is_unary() => {
                let start = operand_start(&result)
                    .ok_or(RegexError::InvalidQuantifierPlacement{ quantifier: op.as_char(), position: i })?;
                let mut operand = result.split_off(start);
                // Chained quantifiers apply to the previous rewrite
                while let Some(Token::Operator(q)) = tokens.get(i) {
                    if !q.is_unary() {
                        break;
                    }
                    operand = apply_quantifier(operand, *q);
                    i += 1;
                }
                result.extend(operand);
            },
            token => {
                result.push(token);
                i += 1;
            },
        }
    }
    Ok(result)
}

/// Finds where the operand ending at the back of `tokens` begins. The operand
/// is either a single symbol or a parenthesized group, found by scanning back
/// from its `)` with a nesting counter.
fn operand_start(tokens: &[Token]) -> Option<usize> {
    match tokens.last()? {
        Token::Symbol(_) => Some(tokens.len() - 1),
        Token::RightParen => {
            let mut depth = 0usize;
            for (j, token) in tokens.iter().enumerate().rev() {
                match token {
                    Token::RightParen => depth += 1,
                    Token::LeftParen => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(j);
                        }
                    },
                    _ => { },
                }
            }
            None
        },
        Token::Operator(_) | Token::LeftParen => None,
    }
}

fn apply_quantifier(operand: Vec<Token>, quantifier: Operator) -> Vec<Token> {
    let mut result = Vec::with_capacity(operand.len() * 2 + 4);
    match quantifier {
        Operator::Plus => {
            result.push(Token::LeftParen);
            result.extend_from_slice(&operand);
            result.extend(operand);
            result.push(Token::Operator(Operator::Star));
            result.push(Token::RightParen);
        },
        Operator::Optional => {
            result.push(Token::LeftParen);
            result.extend(operand);
            result.push(Token::Operator(Operator::Alternation));
            result.push(Token::Symbol(Symbol::Epsilon));
            result.push(Token::RightParen);
        },
        _ => {
            result.extend(operand);
            result.push(Token::Operator(quantifier));
        },
    }
    result
}

pub fn transform_and_validate(regex: &str) -> Result<String, RegexError> {
    let tokens = tokenize(regex);
    check_parentheses(&tokens)?;
    Ok(render(&desugar_quantifiers(&tokens)?))
}

/**
 * Explicit concatenation.
 */

pub fn insert_concatenation(tokens: &[Token]) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        result.push(*token);
        if let Some(next) = tokens.get(i + 1) {
            if token.ends_operand() && next.starts_operand() {
                result.push(Token::Operator(Operator::Concatenation));
            }
        }
    }
    result
}

pub fn insert_explicit_concatenation(regex: &str) -> String {
    render(&insert_concatenation(&tokenize(regex)))
}

/**
 * Infix to postfix.
 */

pub fn shunting_yard(tokens: &[Token]) -> Result<Postfix, RegexError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    for (position, token) in tokens.iter().enumerate() {
        match *token {
            Token::Symbol(_) => output.push(*token),
            Token::Operator(op) => {
                // Everything is left-associative, so equal precedence pops too
                while let Some(&Token::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(*token);
            },
            Token::LeftParen => stack.push(*token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => output.push(top),
                    None => return Err(RegexError::ParenMismatch{ position }),
                }
            },
        }
    }
    while let Some(top) = stack.pop() {
        if top == Token::LeftParen {
            return Err(RegexError::ParenMismatch{ position: tokens.len() });
        }
        output.push(top);
    }
    Ok(Postfix(output))
}

/// Runs every normalization stage over already tokenized regex text.
pub fn normalize(tokens: &[Token]) -> Result<Postfix, RegexError> {
    check_parentheses(tokens)?;
    let desugared = desugar_quantifiers(tokens)?;
    let explicit = insert_concatenation(&desugared);
    log::trace!("explicit form: {}", render(&explicit));
    shunting_yard(&explicit)
}

pub fn to_postfix(regex: &str) -> Result<Postfix, RegexError> {
    normalize(&tokenize(regex))
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod normalize_tests {
    use super::*;
    use rstest::rstest;

    fn symbols(tokens: &[Token]) -> Vec<Symbol> {
        let mut result: Vec<Symbol> = tokens.iter()
            .filter_map(|t| match t {
                Token::Symbol(s) => Some(*s),
                _ => None,
            })
            .collect();
        result.sort_by_key(|s| s.to_string());
        result
    }

    #[rstest]
    #[case("", true)]
    #[case("(a)", true)]
    #[case("((a|b)c)*", true)]
    #[case(")(", false)]
    #[case("(()", false)]
    #[case("a|b)", false)]
    #[case("(a))(", false)]
    fn parentheses(#[case] regex: &str, #[case] balanced: bool) {
        assert_eq!(validate_parentheses(regex), balanced);
    }

    #[test]
    fn unbalanced_prefix_reports_position() {
        assert_eq!(to_postfix("a|b)"), Err(RegexError::ParenMismatch{ position: 3 }));
        assert_eq!(to_postfix("(a"), Err(RegexError::ParenMismatch{ position: 2 }));
    }

    #[rstest]
    #[case("a+", "(aa*)")]
    #[case("a?", "(a|ϵ)")]
    #[case("a?+", "((a|ϵ)(a|ϵ)*)")]
    #[case("a*", "a*")]
    #[case("a++", "((aa*)(aa*)*)")]
    #[case("ab+", "a(bb*)")]
    #[case("(a|b)+", "((a|b)(a|b)*)")]
    #[case("(a(b)c)?", "((a(b)c)|ϵ)")]
    #[case("a|b", "a|b")]
    fn quantifier_desugaring(#[case] regex: &str, #[case] expected: &str) {
        assert_eq!(transform_and_validate(regex), Ok(expected.to_string()));
    }

    #[rstest]
    #[case("+a", '+', 0)]
    #[case("(*a)", '*', 1)]
    #[case("a|?", '?', 2)]
    fn quantifier_without_operand(#[case] regex: &str, #[case] quantifier: char, #[case] position: usize) {
        assert_eq!(
            transform_and_validate(regex),
            Err(RegexError::InvalidQuantifierPlacement{ quantifier, position }));
    }

    #[test]
    fn desugaring_checks_parentheses_first() {
        assert_eq!(transform_and_validate("(a+"), Err(RegexError::ParenMismatch{ position: 3 }));
    }

    #[rstest]
    #[case("ab", "a·b")]
    #[case("abc", "a·b·c")]
    #[case("a(b)", "a·(b)")]
    #[case("(a)(b)", "(a)·(b)")]
    #[case("(a)b", "(a)·b")]
    #[case("a*b", "a*·b")]
    #[case("a|b", "a|b")]
    #[case("(a|ϵ)b", "(a|ϵ)·b")]
    #[case("a·b", "a·b")]
    fn explicit_concatenation(#[case] regex: &str, #[case] expected: &str) {
        assert_eq!(insert_explicit_concatenation(regex), expected);
    }

    #[rstest]
    #[case("ab(c|d)*e")]
    #[case("((a|ϵ)(a|ϵ)*)b")]
    #[case("x*y*z")]
    fn concatenation_is_idempotent(#[case] regex: &str) {
        let once = insert_explicit_concatenation(regex);
        assert_eq!(insert_explicit_concatenation(&once), once);
    }

    #[rstest]
    #[case("a(b|c)*", "abc|*·")]
    #[case("a|b·c", "abc·|")]
    #[case("ab|c", "ab·c|")]
    #[case("(a|b)c*", "ab|c*·")]
    #[case("a*|(b+c)", "a*bb*·c·|")]
    #[case("a?", "aϵ|")]
    #[case("(x|y)*z", "xy|*z·")]
    fn postfix(#[case] regex: &str, #[case] expected: &str) {
        assert_eq!(to_postfix(regex).map(|p| p.to_string()), Ok(expected.to_string()));
    }

    #[test]
    fn alternation_binds_loosest() {
        let postfix = to_postfix("a|b·c").unwrap();
        assert_eq!(postfix.tokens().last(), Some(&Token::Operator(Operator::Alternation)));
    }

    #[test]
    fn named_symbols_stay_whole() {
        let postfix = to_postfix("(PLUS|MINUS)x").unwrap();
        assert_eq!(postfix.tokens(), &[
            Token::Symbol(Symbol::Named("PLUS")),
            Token::Symbol(Symbol::Named("MINUS")),
            Token::Operator(Operator::Alternation),
            Token::Symbol(Symbol::Char('x')),
            Token::Operator(Operator::Concatenation),
        ]);
        assert_eq!(postfix.to_string(), "PLUS MINUS|x·");
    }

    #[test]
    fn quoted_letters_never_read_as_names() {
        let postfix = to_postfix("'D'('O''T')").unwrap();
        assert_eq!(postfix.to_string(), "\\DOT··");
        assert_eq!(tokenize(&postfix.to_string()), postfix.tokens());
        assert_eq!(transform_and_validate("'TAB'"), Ok("\\TAB".to_string()));
    }

    #[rstest]
    #[case("a(b|c)*d")]
    #[case("(0|1|2)(.(0|1))*")]
    #[case("w*(x|y)z*")]
    fn literals_survive_exactly_once(#[case] regex: &str) {
        let infix = tokenize(regex);
        let postfix = to_postfix(regex).unwrap();
        assert_eq!(symbols(postfix.tokens()), symbols(&infix));
    }

    #[test]
    fn stray_close_in_shunting_yard() {
        let tokens = tokenize("a)");
        assert_eq!(shunting_yard(&tokens), Err(RegexError::ParenMismatch{ position: 1 }));
    }

    #[test]
    fn empty_regex_has_empty_postfix() {
        assert_eq!(to_postfix(""), Ok(Postfix::default()));
    }
}
