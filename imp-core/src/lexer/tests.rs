use crate::utils::prelude::SrcSpan;
use super::prelude::*;

fn lex(input: &str) -> Vec<LexResult> {
    Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c))).collect()
}

fn tokens(input: &str) -> Vec<Token> {
    lex(input)
        .into_iter()
        .filter_map(|res| res.ok().map(|(_, token, _)| token))
        .collect()
}

fn errors(input: &str) -> Vec<LexicalError> {
    lex(input)
        .into_iter()
        .filter_map(|res| res.err())
        .collect()
}

#[test]
fn test_operators_and_delimiters() {
    assert_eq!(
        tokens("+ - * / ^ = == != >= <= > < ( ) { } ;"),
        vec![
            Token::Plus,
            Token::Minus,
            Token::Asterisk,
            Token::Slash,
            Token::Caret,
            Token::Assign,
            Token::Equal,
            Token::NotEqual,
            Token::GreaterThanOrEqual,
            Token::LessThanOrEqual,
            Token::GreaterThan,
            Token::LessThan,
            Token::LParen,
            Token::RParen,
            Token::LBrace,
            Token::RBrace,
            Token::Semicolon,
            Token::Eof,
        ]
    );
}

#[test]
fn test_keywords_and_idents() {
    assert_eq!(
        tokens("int float string boolean and or true false if elif else for while print x _tmp v2"),
        vec![
            Token::IntType,
            Token::FloatType,
            Token::StringType,
            Token::BooleanType,
            Token::And,
            Token::Or,
            Token::True,
            Token::False,
            Token::If,
            Token::Elif,
            Token::Else,
            Token::For,
            Token::While,
            Token::Print,
            Token::Ident("x".to_string()),
            Token::Ident("_tmp".to_string()),
            Token::Ident("v2".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_declaration_statement() {
    assert_eq!(
        tokens("int counter = 42;"),
        vec![
            Token::IntType,
            Token::Ident("counter".to_string()),
            Token::Assign,
            Token::Int(42),
            Token::Semicolon,
            Token::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("0 42 3.14 0.5"),
        vec![
            Token::Int(0),
            Token::Int(42),
            Token::Float(3.14),
            Token::Float(0.5),
            Token::Eof,
        ]
    );
}

#[test]
fn test_oversized_integer_becomes_float() {
    assert_eq!(
        tokens("99999999999999999999"),
        vec![Token::Float(1e20), Token::Eof]
    );
}

#[test]
fn test_trailing_period_is_not_a_float() {
    // `5.` lexes as the integer 5; the stray period is reported
    let results = lex("5.");

    assert_eq!(results[0], Ok((0, Token::Int(5), 1)));
    assert_eq!(
        results[1],
        Err(LexicalError {
            error: LexicalErrorType::UnrecognizedCharacter { ch: '.' },
            location: SrcSpan { start: 1, end: 2 },
        })
    );
    assert_eq!(results[2], Ok((2, Token::Eof, 2)));
}

#[test]
fn test_string_quotes_stripped() {
    assert_eq!(
        tokens("\"hello world\""),
        vec![Token::Str("hello world".to_string()), Token::Eof]
    );
}

#[test]
fn test_string_escapes_pass_through() {
    assert_eq!(
        tokens(r#""a\"b\nc""#),
        vec![Token::Str("a\\\"b\\nc".to_string()), Token::Eof]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        errors("\"oops"),
        vec![LexicalError {
            error: LexicalErrorType::UnterminatedString,
            location: SrcSpan { start: 0, end: 5 },
        }]
    );
}

#[test]
fn test_string_broken_by_newline() {
    let errs = errors("\"oops\nint x;");

    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].error, LexicalErrorType::UnterminatedString);
}

#[test]
fn test_bad_character_is_skipped() {
    // The `@` is consumed and reported; lexing continues after it
    let results = lex("1 @ 2");

    assert_eq!(results[0], Ok((0, Token::Int(1), 1)));
    assert_eq!(
        results[1],
        Err(LexicalError {
            error: LexicalErrorType::UnrecognizedCharacter { ch: '@' },
            location: SrcSpan { start: 2, end: 3 },
        })
    );
    assert_eq!(results[2], Ok((4, Token::Int(2), 5)));
}

#[test]
fn test_lone_bang_is_an_error() {
    let results = lex("!x");

    assert_eq!(
        results[0],
        Err(LexicalError {
            error: LexicalErrorType::UnrecognizedCharacter { ch: '!' },
            location: SrcSpan { start: 0, end: 1 },
        })
    );
    assert_eq!(results[1], Ok((1, Token::Ident("x".to_string()), 2)));
}

#[test]
fn test_eof_emitted_once() {
    let mut lexer = Lexer::new("x".char_indices().map(|(i, c)| (i as u32, c)));

    assert_eq!(lexer.next(), Some(Ok((0, Token::Ident("x".to_string()), 1))));
    assert_eq!(lexer.next(), Some(Ok((1, Token::Eof, 1))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_spans_are_byte_offsets() {
    let results = lex("int x");

    assert_eq!(results[0], Ok((0, Token::IntType, 3)));
    assert_eq!(results[1], Ok((4, Token::Ident("x".to_string()), 5)));
}
