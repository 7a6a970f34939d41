use crate::{
    environment::prelude::ValueType,
    lexer::prelude::Token,
    utils::prelude::SrcSpan,
};

/// Semantic problems found while evaluating. None of them stop the run:
/// the offending operation becomes a no-op (or yields a default value)
/// and the problem is reported afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    FloatToIntDeclaration {
        name: String,
    },
    QuotesRequired {
        name: String,
    },
    DeclarationTypeMismatch {
        name: String,
        expected: ValueType,
        got: ValueType,
    },
    AssignToUndeclared {
        name: String,
    },
    AssignTypeMismatch {
        name: String,
        expected: ValueType,
        got: ValueType,
    },
    UndefinedName {
        name: String,
    },
    OperandTypeMismatch {
        operator: Token,
        left: ValueType,
        right: ValueType,
    },
    InvalidUnaryOperand {
        operand: ValueType,
    },
    ConditionNotBoolean {
        got: ValueType,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan,
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::FloatToIntDeclaration { name } => (
                "You can not assign a float to an integer",
                vec![format!("`{name}` was not declared")],
            ),
            RuntimeErrorType::QuotesRequired { name } => (
                "You need to use quotes",
                vec![format!("A string value is required to declare `{name}`")],
            ),
            RuntimeErrorType::DeclarationTypeMismatch { name, expected, got } => (
                "Declared type does not match the value",
                vec![format!("`{name}` is declared as {expected} but the value is {got}")],
            ),
            RuntimeErrorType::AssignToUndeclared { name } => (
                "You must declare a variable before using it",
                vec![format!("`{name}` has not been declared, the assignment is skipped")],
            ),
            RuntimeErrorType::AssignTypeMismatch { name, expected, got } => (
                "Assigned value does not match the declared type",
                vec![format!("`{name}` is declared as {expected} but the value is {got}")],
            ),
            RuntimeErrorType::UndefinedName { name } => (
                "Undefined name",
                vec![format!("`{name}` has not been declared, it is treated as 0")],
            ),
            RuntimeErrorType::OperandTypeMismatch { operator, left, right } => (
                "Operand types do not match the operator",
                vec![format!(
                    "`{}` can not be applied to {left} and {right}",
                    operator.as_literal()
                )],
            ),
            RuntimeErrorType::InvalidUnaryOperand { operand } => (
                "Invalid operand for unary minus",
                vec![format!("`-` can not be applied to {operand}")],
            ),
            RuntimeErrorType::ConditionNotBoolean { got } => (
                "Condition is not a boolean",
                vec![format!("The condition evaluates to {got}, it is treated as false")],
            ),
        }
    }
}
