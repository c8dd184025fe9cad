/**
 * The regex syntax tree built from a postfix expression.
 */

use std::fmt;
use crate::token::{Operator, Symbol};

/// Every node owns its children, binary operand order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Symbol),

    UnaryOp{
        op: Operator,
        child: Box<Node>,
    },

    BinaryOp{
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn unary(op: Operator, child: Node) -> Self {
        Node::UnaryOp{ op, child: Box::new(child) }
    }

    pub fn binary(op: Operator, left: Node, right: Node) -> Self {
        Node::BinaryOp{ op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::UnaryOp{ child, .. } => child.leaf_count(),
            Node::BinaryOp{ left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::UnaryOp{ child, .. } => 1 + child.depth(),
            Node::BinaryOp{ left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Leaf(_) => u8::MAX,
            Node::UnaryOp{ op, .. } | Node::BinaryOp{ op, .. } => op.precedence(),
        }
    }
}

/// Writes the tree as infix regex text with only the parentheses it needs.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(symbol) => write!(f, "{}", symbol),

            Node::UnaryOp{ op, child } => {
                if child.precedence() < op.precedence() {
                    write!(f, "({}){}", child, op)
                }
                else {
                    write!(f, "{}{}", child, op)
                }
            },

            Node::BinaryOp{ op, left, right } => {
                if left.precedence() < op.precedence() {
                    write!(f, "({})", left)?;
                }
                else {
                    write!(f, "{}", left)?;
                }
                write!(f, "{}", op)?;
                // Left-associative, so an equal right operand needs grouping
                if right.precedence() <= op.precedence() {
                    write!(f, "({})", right)
                }
                else {
                    write!(f, "{}", right)
                }
            },
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
