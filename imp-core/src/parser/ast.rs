use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, LexicalError, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseErrorType, Precedence},
    utils::prelude::SrcSpan,
};

/// Result of a successful parse. Lexical errors are recoverable (the
/// lexer skips the offending character), so they ride along instead of
/// failing the parse.
#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub lex_errors: Vec<LexicalError>,
}

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut statements: Vec<Statement> = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::Eof, _)) | None => break,
                Some(_) => statements.push(Statement::parse(parser, None)?),
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => SrcSpan {
                start: first.location().start,
                end: last.location().end,
            },
            _ => SrcSpan { start: 0, end: 0 },
        };

        Ok(Self {
            statements,
            location,
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// statement -> (<print> | <declare> | <assign>) ';' | <if> | <for> | <while>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declare(Declare),
    Assign(Assign),
    Print(Print),
    If(If),
    For(For),
    While(While),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let res = match &parser.current_token {
            Some((start, token, end)) => match token {
                token if token.is_variable_type() => {
                    let declare = Declare::parse(parser, None)?;
                    parser.expect_semicolon(declare.location)?;

                    Self::Declare(declare)
                }
                Token::Ident(_) => {
                    let assign = Assign::parse(parser, None)?;
                    parser.expect_semicolon(assign.location)?;

                    Self::Assign(assign)
                }
                Token::Print => {
                    let print = Print::parse(parser, None)?;
                    parser.expect_semicolon(print.location)?;

                    Self::Print(print)
                }
                Token::If => Self::If(If::parse(parser, None)?),
                Token::For => Self::For(For::parse(parser, None)?),
                Token::While => Self::While(While::parse(parser, None)?),
                Token::Eof => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: *start, end: *end },
                ),
                _ => return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: token.clone(),
                        expected: vec!["a statement".to_string()],
                    },
                    SrcSpan { start: *start, end: *end },
                ),
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declare(declare) => write!(f, "{declare};"),
            Self::Assign(assign) => write!(f, "{assign};"),
            Self::Print(print) => write!(f, "{print};"),
            Self::If(conditional) => write!(f, "{conditional}"),
            Self::For(loop_) => write!(f, "{loop_}"),
            Self::While(loop_) => write!(f, "{loop_}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Declare(declare) => declare.location,
            Self::Assign(assign) => assign.location,
            Self::Print(print) => print.location,
            Self::If(conditional) => conditional.location,
            Self::For(loop_) => loop_.location,
            Self::While(loop_) => loop_.location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarType {
    Int,
    Float,
    String,
    Boolean,
}

impl Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let var_type = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
        };

        write!(f, "{var_type}")
    }
}

impl From<Token> for VarType {
    fn from(value: Token) -> Self {
        match value {
            Token::IntType => Self::Int,
            Token::FloatType => Self::Float,
            Token::StringType => Self::String,
            Token::BooleanType => Self::Boolean,
            _ => panic!("Invalid token to variable type conversion"),
        }
    }
}

// declare -> <type> <identifier> [ '=' <expression> ]
#[derive(Debug, Clone, PartialEq)]
pub struct Declare {
    pub var_type: VarType,
    pub name: Identifier,
    pub value: Option<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Declare {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, var_type) = match parser.current_token.take() {
            Some((start, token, _)) if token.is_variable_type() => {
                parser.step();
                (start, VarType::from(token))
            }
            Some(t) => {
                let (start, _, end) = t.clone();
                parser.current_token = Some(t);

                return parse_error(
                    ParseErrorType::ExpectedType,
                    SrcSpan { start, end },
                );
            }
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let name = Identifier::from(parser.expect_ident()?);
        let mut end = name.location.end;

        let value = match parser.current_token {
            Some((_, Token::Assign, _)) => {
                parser.step();

                let value = Expression::parse(parser, None)?;
                end = value.location().end;

                Some(value)
            }
            _ => None,
        };

        Ok(Self {
            var_type,
            name,
            value,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Declare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {} = {}", self.var_type, self.name, value),
            None => write!(f, "{} {}", self.var_type, self.name),
        }
    }
}

// assign -> <identifier> '=' <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Assign {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let ident = parser.expect_ident()?;
        let start = ident.0;

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        Ok(Self {
            name: ident.into(),
            value,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

// print -> 'print' '(' <expression> ')'
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub value: Expression,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Print {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        parser.expect_one(Token::LParen)?;
        let value = Expression::parse(parser, None)?;
        let (_, end) = parser.expect_one(Token::RParen)?;

        Ok(Self {
            value,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print({})", self.value)
    }
}

// block -> '{' { <statement> } '}'
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut statements = vec![];

        let end = loop {
            match &parser.current_token {
                Some((_, Token::RBrace, _)) => {
                    let (_, end) = parser.expect_one(Token::RBrace)?;
                    break end;
                }
                Some((start, Token::Eof, end)) => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: *start, end: *end },
                ),
                Some(_) => statements.push(Statement::parse(parser, None)?),
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 },
                ),
            }
        };

        Ok(Self {
            statements,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// if -> 'if' '(' <expression> ')' <block> { <elif> } [ 'else' <block> ]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expression,
    pub consequence: Block,
    pub elif_clauses: Vec<ElifClause>,
    pub alternative: Option<Block>,
    pub location: SrcSpan,
}

// elif -> 'elif' '(' <expression> ')' <block>
#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub condition: Expression,
    pub body: Block,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for If {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let consequence = Block::parse(parser, None)?;
        let mut end = consequence.location.end;

        // Clauses keep their source order; the first truthy one wins
        let mut elif_clauses = vec![];

        while let Some((_, Token::Elif, _)) = parser.current_token {
            let (elif_start, _) = parser.expect_one(Token::Elif)?;

            parser.expect_one(Token::LParen)?;
            let condition = Expression::parse(parser, None)?;
            parser.expect_one(Token::RParen)?;

            let body = Block::parse(parser, None)?;
            end = body.location.end;

            elif_clauses.push(ElifClause {
                condition,
                body,
                location: SrcSpan { start: elif_start, end },
            });
        }

        let alternative = match parser.current_token {
            Some((_, Token::Else, _)) => {
                parser.expect_one(Token::Else)?;

                let alternative = Block::parse(parser, None)?;
                end = alternative.location.end;

                Some(alternative)
            }
            _ => None,
        };

        Ok(Self {
            condition,
            consequence,
            elif_clauses,
            alternative,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;

        for clause in &self.elif_clauses {
            write!(f, " elif ({}) {}", clause.condition, clause.body)?;
        }

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// for -> 'for' '(' <declare> ';' <expression> ';' <assign> ')' <block>
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Declare,
    pub condition: Expression,
    pub step: Assign,
    pub body: Block,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for For {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::For)?;

        parser.expect_one(Token::LParen)?;

        let init = Declare::parse(parser, None)?;
        if init.value.is_none() {
            return parse_error(ParseErrorType::ExpectedInitializer, init.location);
        }
        parser.expect_one(Token::Semicolon)?;

        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::Semicolon)?;

        let step = Assign::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;

        let location = SrcSpan { start, end: body.location.end };

        Ok(Self {
            init,
            condition,
            step,
            body,
            location,
        })
    }
}

impl Display for For {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for ({}; {}; {}) {}",
            self.init,
            self.condition,
            self.step,
            self.body
        )
    }
}

// while -> 'while' '(' <expression> ')' <block>
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: Block,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for While {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;

        let location = SrcSpan { start, end: body.location.end };

        Ok(Self {
            condition,
            body,
            location,
        })
    }
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

// expression -> <identifier> | <infix> | <prefix> | <literal> | '(' <expression> ')'
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Infix(Infix),
    Prefix(Prefix),
    Literal(Literal),
    Grouped {
        expression: Box<Expression>,
        location: SrcSpan,
    },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut expr = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Ident(_) => {
                    let ident = parser.expect_ident()?;

                    Self::Identifier(Identifier::from(ident))
                }
                Token::Minus => Self::Prefix(Prefix::parse(parser, None)?),
                Token::Int(_)
                | Token::Float(_)
                | Token::Str(_)
                | Token::True
                | Token::False => Self::Literal(Literal::parse(parser, None)?),
                Token::LParen => {
                    let (start, _) = parser.expect_one(Token::LParen)?;

                    let expression = Box::new(Expression::parse(parser, None)?);

                    let (_, end) = parser.expect_one(Token::RParen)?;

                    Self::Grouped {
                        expression,
                        location: SrcSpan { start, end },
                    }
                }
                _ => return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: token.clone(),
                        expected: vec!["an Identifier, a literal, `-` or `(`".to_string()],
                    },
                    SrcSpan { start: *start, end: *end },
                ),
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = match &parser.current_token {
                Some((start, next_token, end)) if next_token.is_operator() => {
                    // Comparisons do not associate: `a < b < c` is a
                    // grammar error, not a chained comparison
                    if next_token.is_comparison() {
                        if let Expression::Infix(infix) = &expr {
                            if infix.operator.is_comparison() {
                                return parse_error(
                                    ParseErrorType::ChainedComparison,
                                    SrcSpan { start: *start, end: *end },
                                );
                            }
                        }
                    }

                    Self::Infix(Infix::parse(parser, expr, precedence)?)
                }
                _ => break,
            }
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Grouped { expression, .. } => write!(f, "({expression})"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Infix(infix) => infix.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Literal(literal) => literal.location(),
            Self::Grouped { location, .. } => *location,
        }
    }
}

// identifier -> <letter> { <letter> | <digit> | '_' }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 },
        }
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match parser.next_token() {
            Some((_, token, _)) => token,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// prefix -> '-' <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Prefix {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, token, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        // Unary minus binds tighter than every binary operator
        let expression = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = expression.location().end;

        Ok(Self {
            operator: token,
            expression: Box::new(expression),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.as_literal(), self.expression)
    }
}

// literal -> <int> | <float> | <string> | <bool>
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int {
        value: i64,
        location: SrcSpan,
    },
    Float {
        value: f64,
        location: SrcSpan,
    },
    Str {
        value: String,
        location: SrcSpan,
    },
    Bool {
        value: bool,
        location: SrcSpan,
    },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Literal {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        match parser.next_token() {
            Some((start, token, end)) => {
                let location = SrcSpan { start, end };

                match token {
                    Token::Int(value) => Ok(Self::Int { value, location }),
                    Token::Float(value) => Ok(Self::Float { value, location }),
                    Token::Str(value) => Ok(Self::Str { value, location }),
                    Token::True => Ok(Self::Bool { value: true, location }),
                    Token::False => Ok(Self::Bool { value: false, location }),
                    token => parse_error(
                        ParseErrorType::UnexpectedToken {
                            token,
                            expected: vec!["a literal".to_string()],
                        },
                        location,
                    ),
                }
            }
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Bool { value, .. } => write!(f, "{value}"),
        }
    }
}

impl Literal {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Float { location, .. }
            | Self::Str { location, .. }
            | Self::Bool { location, .. } => *location,
        }
    }
}
