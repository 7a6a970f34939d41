use crate::{
    lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token},
    utils::prelude::SrcSpan,
};
use super::ast::{Parsed, Program, Expression};
use super::error::{ParseError, ParseErrorType};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Token-stream parser with one token of lookahead.
///
/// Lexical errors carried by the stream are collected rather than turned
/// into parse failures; the bad characters were already skipped by the
/// lexer, so the surrounding grammar can still be recognized.
pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Err(err)) => {
                    self.lex_errors.push(err);
                }
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                }
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest,
        }
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = Program::parse(self, None)?;

        Ok(Parsed {
            program,
            lex_errors: std::mem::take(&mut self.lex_errors),
        })
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            }
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end },
                )
            }
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            }
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end },
                )
            }
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        }
    }

    /// A missing `;` after a simple statement points at the gap right
    /// after the statement instead of at whatever token comes next.
    pub fn expect_semicolon(&mut self, after: SrcSpan) -> Result<(u32, u32), ParseError> {
        match self.expect_one(Token::Semicolon) {
            Ok(span) => Ok(span),
            Err(_) => parse_error(
                ParseErrorType::MissingSemicolon,
                SrcSpan { start: after.end, end: after.end + 1 },
            ),
        }
    }
}

/// Binding strength, weakest first. Comparison is non-associative: the
/// expression parser refuses to stack two of them without parentheses.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Logic,
    Comparison,
    Sum,
    Product,
    Exponent,
    Prefix,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::And | Token::Or => Self::Logic,
            Token::Equal | Token::NotEqual |
            Token::GreaterThanOrEqual | Token::LessThanOrEqual |
            Token::GreaterThan | Token::LessThan => Self::Comparison,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Asterisk | Token::Slash => Self::Product,
            Token::Caret => Self::Exponent,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_program(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
