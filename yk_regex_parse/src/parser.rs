/**
 * Reduces a postfix expression into a syntax tree.
 */

use crate::ast::Node;
use crate::error::RegexError;
use crate::normalize::{to_postfix, Postfix};
use crate::token::Token;

/// Parses infix regex text all the way into a tree.
pub fn parse(source: &str) -> Result<Node, RegexError> {
    build(to_postfix(source)?)
}

pub fn build(postfix: Postfix) -> Result<Node, RegexError> {
    let len = postfix.len();
    let mut stack: Vec<Node> = Vec::new();
    for (position, token) in postfix.into_iter().enumerate() {
        let node = match token {
            Token::Symbol(symbol) => Node::Leaf(symbol),

            Token::Operator(op) if op.is_unary() => {
                let child = pop_operand(&mut stack, position)?;
                Node::unary(op, child)
            },

            Token::Operator(op) => {
                // The right operand is on top
                let right = pop_operand(&mut stack, position)?;
                let left = pop_operand(&mut stack, position)?;
                Node::binary(op, left, right)
            },

            Token::LeftParen | Token::RightParen => {
                return Err(RegexError::StackIntegrity{ position, remaining: stack.len() });
            },
        };
        stack.push(node);
    }

    let remaining = stack.len();
    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(root),
        _ => Err(RegexError::StackIntegrity{ position: len, remaining }),
    }
}

fn pop_operand(stack: &mut Vec<Node>, position: usize) -> Result<Node, RegexError> {
    stack.pop().ok_or(RegexError::StackIntegrity{ position, remaining: 0 })
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod regex_parser_tests {
    use super::*;
    use crate::token::{tokenize, Operator, Symbol};

    /**
     * Helpers to construct results.
     */

    fn alt(left: Node, right: Node) -> Node {
        Node::binary(Operator::Alternation, left, right)
    }

    fn seq(left: Node, right: Node) -> Node {
        Node::binary(Operator::Concatenation, left, right)
    }

    fn star(child: Node) -> Node {
        Node::unary(Operator::Star, child)
    }

    fn ch(c: char) -> Node {
        Node::Leaf(Symbol::Char(c))
    }

    fn eps() -> Node {
        Node::Leaf(Symbol::Epsilon)
    }

    fn postfix(text: &str) -> Postfix {
        Postfix::from(tokenize(text))
    }

    /**
     * Actual tests.
     */

    #[test]
    fn a_then_b_or_c_zero_or_more() {
        assert_eq!(build(postfix("abc|*·")), Ok(seq(ch('a'), star(alt(ch('b'), ch('c'))))));
    }

    #[test]
    fn binary_operand_order() {
        assert_eq!(build(postfix("ab·")), Ok(seq(ch('a'), ch('b'))));
        assert_eq!(build(postfix("ba|")), Ok(alt(ch('b'), ch('a'))));
    }

    #[test]
    fn a_or_b_or_c() {
        assert_eq!(parse("a|b|c"), Ok(alt(alt(ch('a'), ch('b')), ch('c'))));
    }

    #[test]
    fn ab_or_c() {
        assert_eq!(parse("ab|c"), Ok(alt(seq(ch('a'), ch('b')), ch('c'))));
    }

    #[test]
    fn a_one_or_more() {
        assert_eq!(parse("a+"), Ok(seq(ch('a'), star(ch('a')))));
    }

    #[test]
    fn a_optional() {
        assert_eq!(parse("a?"), Ok(alt(ch('a'), eps())));
    }

    #[test]
    fn single_literal() {
        assert_eq!(parse("a"), Ok(ch('a')));
    }

    #[test]
    fn empty_postfix_is_malformed() {
        assert_eq!(build(Postfix::default()), Err(RegexError::StackIntegrity{ position: 0, remaining: 0 }));
    }

    #[test]
    fn leftover_operands_are_malformed() {
        assert_eq!(build(postfix("ab")), Err(RegexError::StackIntegrity{ position: 2, remaining: 2 }));
    }

    #[test]
    fn missing_operand_is_malformed() {
        assert_eq!(build(postfix("a|")), Err(RegexError::StackIntegrity{ position: 1, remaining: 0 }));
        assert_eq!(parse("a|"), Err(RegexError::StackIntegrity{ position: 1, remaining: 0 }));
    }

    #[test]
    fn tree_displays_back_to_infix() {
        let tree = parse("a(b|c)*").unwrap();
        assert_eq!(tree.to_string(), "a·(b|c)*");
    }
}
