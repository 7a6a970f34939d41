use std::fmt::Display;

use crate::{environment::prelude::Value, lexer::prelude::Token};

/// Compiler-generated temporary, numbered from 1 in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temp(pub u32);

impl Display for Temp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Temp(Temp),
    Literal(Value),
    Name(String),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temp(temp) => write!(f, "{temp}"),
            Self::Literal(Value::String { value }) => write!(f, "\"{value}\""),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// One three-address instruction: `dest = left <op> right`, or
/// `dest = <op> left` when `right` is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub dest: Temp,
    pub op: Token,
    pub left: Operand,
    pub right: Option<Operand>,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.right {
            Some(right) => write!(f, "{} = {} {} {}", self.dest, self.left, self.op.as_literal(), right),
            None => write!(f, "{} = {} {}", self.dest, self.op.as_literal(), self.left),
        }
    }
}
