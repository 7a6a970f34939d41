pub mod error;
pub mod tac;

pub mod prelude {
    pub use super::{
        error::*,
        tac::*,
        Evaluator
    };
}

#[cfg(test)]
mod tests;

use std::io::{self, Write};

use crate::{
    environment::prelude::{Environment, Value, ValueType},
    lexer::prelude::Token,
    parser::prelude::{
        Assign, Block, Declare, Expression, For, If, Infix, Literal, Prefix,
        Print, Program, Statement, While,
    },
};
use error::{RuntimeError, RuntimeErrorType};
use tac::{Instruction, Operand, Temp};

/// Tree-walking evaluator that doubles as a three-address code emitter.
///
/// Statements execute as they are visited; every arithmetic, logical and
/// comparison operation additionally appends an instruction to `code`.
/// Semantic problems never abort the run: the offending operation is
/// skipped (declarations and assignments) or yields a default value
/// (expressions), and the problem is collected for reporting afterwards.
pub struct Evaluator<W: Write> {
    env: Environment,
    temps: u32,
    code: Vec<Instruction>,
    errors: Vec<RuntimeError>,
    out: W,
}

impl<W: Write> Evaluator<W> {
    pub fn new(out: W) -> Self {
        Self {
            env: Environment::new(),
            temps: 0,
            code: vec![],
            errors: vec![],
            out,
        }
    }

    pub fn eval_program(&mut self, program: &Program) -> io::Result<()> {
        for statement in &program.statements {
            self.eval_statement(statement)?;
        }

        Ok(())
    }

    pub fn eval_statement(&mut self, statement: &Statement) -> io::Result<()> {
        match statement {
            Statement::Declare(declare) => {
                self.eval_declare(declare);
                Ok(())
            }
            Statement::Assign(assign) => {
                self.eval_assign(assign);
                Ok(())
            }
            Statement::Print(print) => self.eval_print(print),
            Statement::If(conditional) => self.eval_if(conditional),
            Statement::For(loop_) => self.eval_for(loop_),
            Statement::While(loop_) => self.eval_while(loop_),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    pub fn take_errors(&mut self) -> Vec<RuntimeError> {
        std::mem::take(&mut self.errors)
    }

    fn eval_declare(&mut self, declare: &Declare) {
        let name = declare.name.value.clone();
        let expected = ValueType::from(declare.var_type);

        let Some(initializer) = &declare.value else {
            self.env.declare(name, expected);
            return;
        };

        let (value, _) = self.eval_expression(initializer);

        match conform(expected, value) {
            Ok(value) => self.env.declare_with(name, value),
            Err(clash) => {
                let error = match clash {
                    TypeClash::FloatToInt => RuntimeErrorType::FloatToIntDeclaration { name },
                    TypeClash::NeedsQuotes { .. } => RuntimeErrorType::QuotesRequired { name },
                    TypeClash::Other { got } => RuntimeErrorType::DeclarationTypeMismatch {
                        name,
                        expected,
                        got,
                    },
                };

                self.errors.push(RuntimeError {
                    error,
                    location: declare.location,
                });
            }
        }
    }

    fn eval_assign(&mut self, assign: &Assign) {
        let (value, _) = self.eval_expression(&assign.value);
        let name = &assign.name.value;

        let Some(current) = self.env.get(name) else {
            self.errors.push(RuntimeError {
                error: RuntimeErrorType::AssignToUndeclared { name: name.clone() },
                location: assign.location,
            });

            return;
        };

        // The declared type never changes after the declaration
        let expected = current._type();

        match conform(expected, value) {
            Ok(value) => self.env.set(name, value),
            Err(clash) => self.errors.push(RuntimeError {
                error: RuntimeErrorType::AssignTypeMismatch {
                    name: name.clone(),
                    expected,
                    got: clash.got(),
                },
                location: assign.location,
            }),
        }
    }

    fn eval_print(&mut self, print: &Print) -> io::Result<()> {
        let (value, _) = self.eval_expression(&print.value);

        writeln!(self.out, "{value}")
    }

    fn eval_if(&mut self, conditional: &If) -> io::Result<()> {
        if self.eval_condition(&conditional.condition) {
            return self.eval_block(&conditional.consequence);
        }

        for clause in &conditional.elif_clauses {
            if self.eval_condition(&clause.condition) {
                return self.eval_block(&clause.body);
            }
        }

        if let Some(alternative) = &conditional.alternative {
            return self.eval_block(alternative);
        }

        Ok(())
    }

    fn eval_for(&mut self, loop_: &For) -> io::Result<()> {
        self.eval_declare(&loop_.init);

        // A rejected initializer would leave the loop variable reading as
        // 0 forever, so the whole loop is skipped instead
        if !self.env.contains(&loop_.init.name.value) {
            return Ok(());
        }

        while self.eval_condition(&loop_.condition) {
            self.eval_block(&loop_.body)?;
            self.eval_assign(&loop_.step);
        }

        Ok(())
    }

    fn eval_while(&mut self, loop_: &While) -> io::Result<()> {
        while self.eval_condition(&loop_.condition) {
            self.eval_block(&loop_.body)?;
        }

        Ok(())
    }

    fn eval_block(&mut self, block: &Block) -> io::Result<()> {
        for statement in &block.statements {
            self.eval_statement(statement)?;
        }

        Ok(())
    }

    fn eval_condition(&mut self, condition: &Expression) -> bool {
        let (value, _) = self.eval_expression(condition);

        match value {
            Value::Boolean { value } => value,
            value => {
                self.errors.push(RuntimeError {
                    error: RuntimeErrorType::ConditionNotBoolean { got: value._type() },
                    location: condition.location(),
                });

                false
            }
        }
    }

    pub fn eval_expression(&mut self, expression: &Expression) -> (Value, Operand) {
        match expression {
            Expression::Identifier(ident) => match self.env.get(&ident.value) {
                Some(value) => (value.clone(), Operand::Name(ident.value.clone())),
                None => {
                    self.errors.push(RuntimeError {
                        error: RuntimeErrorType::UndefinedName { name: ident.value.clone() },
                        location: ident.location,
                    });

                    (Value::Integer { value: 0 }, Operand::Name(ident.value.clone()))
                }
            },
            Expression::Literal(literal) => {
                let value = match literal {
                    Literal::Int { value, .. } => Value::Integer { value: *value },
                    Literal::Float { value, .. } => Value::Float { value: *value },
                    Literal::Str { value, .. } => Value::String { value: value.clone() },
                    Literal::Bool { value, .. } => Value::Boolean { value: *value },
                };

                (value.clone(), Operand::Literal(value))
            }
            // Grouping changes parse shape only, no instruction is emitted
            Expression::Grouped { expression, .. } => self.eval_expression(expression),
            Expression::Prefix(prefix) => self.eval_prefix(prefix),
            Expression::Infix(infix) => self.eval_infix(infix),
        }
    }

    fn eval_prefix(&mut self, prefix: &Prefix) -> (Value, Operand) {
        let (value, operand) = self.eval_expression(&prefix.expression);

        let value = match value {
            Value::Integer { value } => match value.checked_neg() {
                Some(value) => Value::Integer { value },
                None => Value::Float { value: -(value as f64) },
            },
            Value::Float { value } => Value::Float { value: -value },
            value => {
                self.errors.push(RuntimeError {
                    error: RuntimeErrorType::InvalidUnaryOperand { operand: value._type() },
                    location: prefix.location,
                });

                return (
                    Value::Integer { value: 0 },
                    Operand::Literal(Value::Integer { value: 0 }),
                );
            }
        };

        let dest = self.alloc_temp();
        self.code.push(Instruction {
            dest,
            op: Token::Minus,
            left: operand,
            right: None,
        });

        (value, Operand::Temp(dest))
    }

    fn eval_infix(&mut self, infix: &Infix) -> (Value, Operand) {
        // Both sides always evaluate; `and`/`or` do not short-circuit
        let (left, left_operand) = self.eval_expression(&infix.left);
        let (right, right_operand) = self.eval_expression(&infix.right);

        match apply_infix(&infix.operator, left, right) {
            Ok(value) => {
                let dest = self.alloc_temp();
                self.code.push(Instruction {
                    dest,
                    op: infix.operator.clone(),
                    left: left_operand,
                    right: Some(right_operand),
                });

                (value, Operand::Temp(dest))
            }
            Err((left, right)) => {
                self.errors.push(RuntimeError {
                    error: RuntimeErrorType::OperandTypeMismatch {
                        operator: infix.operator.clone(),
                        left,
                        right,
                    },
                    location: infix.location,
                });

                (
                    Value::Integer { value: 0 },
                    Operand::Literal(Value::Integer { value: 0 }),
                )
            }
        }
    }

    fn alloc_temp(&mut self) -> Temp {
        self.temps += 1;

        Temp(self.temps)
    }
}

enum TypeClash {
    FloatToInt,
    NeedsQuotes { got: ValueType },
    Other { got: ValueType },
}

impl TypeClash {
    fn got(&self) -> ValueType {
        match self {
            Self::FloatToInt => ValueType::Float,
            Self::NeedsQuotes { got } | Self::Other { got } => *got,
        }
    }
}

/// Checks a value against a declared type. The single implicit
/// conversion in the language is integer to float.
fn conform(expected: ValueType, value: Value) -> Result<Value, TypeClash> {
    match (expected, value) {
        (ValueType::Integer, value @ Value::Integer { .. }) => Ok(value),
        (ValueType::Integer, Value::Float { .. }) => Err(TypeClash::FloatToInt),

        (ValueType::Float, Value::Integer { value }) => Ok(Value::Float { value: value as f64 }),
        (ValueType::Float, value @ Value::Float { .. }) => Ok(value),

        (ValueType::String, value @ Value::String { .. }) => Ok(value),
        (ValueType::String, value @ (Value::Integer { .. } | Value::Float { .. })) => {
            Err(TypeClash::NeedsQuotes { got: value._type() })
        }

        (ValueType::Boolean, value @ Value::Boolean { .. }) => Ok(value),

        (_, value) => Err(TypeClash::Other { got: value._type() }),
    }
}

fn apply_infix(op: &Token, left: Value, right: Value) -> Result<Value, (ValueType, ValueType)> {
    let clash = (left._type(), right._type());

    match op {
        Token::Plus => match (left, right) {
            // Integer arithmetic degrades to floats on overflow, like
            // exponentiation below
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                Ok(match l.checked_add(r) {
                    Some(value) => Value::Integer { value },
                    None => Value::Float { value: l as f64 + r as f64 },
                })
            }
            (Value::String { value: l }, Value::String { value: r }) => {
                Ok(Value::String { value: format!("{l}{r}") })
            }
            (l, r) => match (as_float(&l), as_float(&r)) {
                (Some(l), Some(r)) => Ok(Value::Float { value: l + r }),
                _ => Err(clash),
            },
        },
        Token::Minus | Token::Asterisk => match (left, right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                let checked = if *op == Token::Minus {
                    l.checked_sub(r)
                } else {
                    l.checked_mul(r)
                };

                Ok(match checked {
                    Some(value) => Value::Integer { value },
                    None => Value::Float {
                        value: if *op == Token::Minus {
                            l as f64 - r as f64
                        } else {
                            l as f64 * r as f64
                        },
                    },
                })
            }
            (l, r) => match (as_float(&l), as_float(&r)) {
                (Some(l), Some(r)) => Ok(Value::Float {
                    value: if *op == Token::Minus { l - r } else { l * r },
                }),
                _ => Err(clash),
            },
        },
        // True division: `/` always yields a float, and division by zero
        // follows IEEE 754
        Token::Slash => match (as_float(&left), as_float(&right)) {
            (Some(l), Some(r)) => Ok(Value::Float { value: l / r }),
            _ => Err(clash),
        },
        Token::Caret => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) if *r >= 0 => {
                // Overflowing powers fall back to the float result
                match u32::try_from(*r).ok().and_then(|exp| l.checked_pow(exp)) {
                    Some(value) => Ok(Value::Integer { value }),
                    None => Ok(Value::Float { value: (*l as f64).powf(*r as f64) }),
                }
            }
            _ => match (as_float(&left), as_float(&right)) {
                (Some(l), Some(r)) => Ok(Value::Float { value: l.powf(r) }),
                _ => Err(clash),
            },
        },
        Token::And | Token::Or => match (left, right) {
            (Value::Boolean { value: l }, Value::Boolean { value: r }) => Ok(Value::Boolean {
                value: if *op == Token::And { l && r } else { l || r },
            }),
            _ => Err(clash),
        },
        op if op.is_comparison() => {
            let ordering = match (&left, &right) {
                (Value::Integer { value: l }, Value::Integer { value: r }) => Some(l.cmp(r)),
                (Value::String { value: l }, Value::String { value: r }) => Some(l.cmp(r)),
                (Value::Boolean { value: l }, Value::Boolean { value: r })
                    if matches!(op, Token::Equal | Token::NotEqual) =>
                {
                    Some(l.cmp(r))
                }
                (l, r) => match (as_float(l), as_float(r)) {
                    (Some(l), Some(r)) => Some(l.total_cmp(&r)),
                    _ => None,
                },
            };

            match ordering {
                Some(ordering) => Ok(Value::Boolean { value: compare(op, ordering) }),
                None => Err(clash),
            }
        }
        _ => Err(clash),
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer { value } => Some(*value as f64),
        Value::Float { value } => Some(*value),
        _ => None,
    }
}

fn compare(op: &Token, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering;

    match op {
        Token::Equal => ordering == Ordering::Equal,
        Token::NotEqual => ordering != Ordering::Equal,
        Token::GreaterThan => ordering == Ordering::Greater,
        Token::GreaterThanOrEqual => ordering != Ordering::Less,
        Token::LessThan => ordering == Ordering::Less,
        Token::LessThanOrEqual => ordering != Ordering::Greater,
        _ => false,
    }
}
