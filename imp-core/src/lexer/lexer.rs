use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token};
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Character-stream lexer with one token of lookahead state.
///
/// The iterator yields `Err` items for unrecognized characters and keeps
/// going afterwards: a bad character is consumed and reported, never
/// allowed to wedge the stream. `Eof` is produced exactly once.
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    position: u32,
    next_position: u32,
    ch: Option<char>,
    next_ch: Option<char>,
    input: T,

    emitted_eof: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,

            emitted_eof: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
        let span = match self.ch {
            Some(ch) => match ch {
                '(' => self.eat_one_char(Token::LParen),
                ')' => self.eat_one_char(Token::RParen),
                '{' => self.eat_one_char(Token::LBrace),
                '}' => self.eat_one_char(Token::RBrace),
                ';' => self.eat_one_char(Token::Semicolon),
                '+' => self.eat_one_char(Token::Plus),
                '-' => self.eat_one_char(Token::Minus),
                '*' => self.eat_one_char(Token::Asterisk),
                '/' => self.eat_one_char(Token::Slash),
                '^' => self.eat_one_char(Token::Caret),
                '=' => match self.next_ch {
                    Some('=') => self.eat_two_chars(Token::Equal),
                    _ => self.eat_one_char(Token::Assign),
                },
                '>' => match self.next_ch {
                    Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
                    _ => self.eat_one_char(Token::GreaterThan),
                },
                '<' => match self.next_ch {
                    Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
                    _ => self.eat_one_char(Token::LessThan),
                },
                '!' => match self.next_ch {
                    Some('=') => self.eat_two_chars(Token::NotEqual),
                    // A lone `!` matches nothing in the grammar
                    _ => return Err(self.skip_bad_char()),
                },
                '"' => return self.lex_string(),
                'a'..='z' | 'A'..='Z' | '_' => return Ok(self.lex_ident()),
                '0'..='9' => return Ok(self.lex_number()),
                ' ' | '\t' | '\r' | '\n' => {
                    self.next_char();
                    return self.next_token();
                }
                _ => return Err(self.skip_bad_char()),
            },
            None => {
                self.emitted_eof = true;
                (self.position, Token::Eof, self.position)
            }
        };

        Ok(span)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch;

        let next = match self.input.next() {
            Some((pos, ch)) => {
                self.position = self.next_position;
                self.next_position = pos;

                Some(ch)
            }
            None => {
                self.position = self.next_position;
                self.next_position += 1;

                None
            }
        };

        self.ch = self.next_ch;
        self.next_ch = next;

        ch
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    fn eat_two_chars(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    /// Recoverable-skip policy: consume the offending character so the
    /// stream can continue, and report it.
    fn skip_bad_char(&mut self) -> LexicalError {
        let start_pos = self.position;
        let ch = self.next_char().expect("skip_bad_char on empty input");
        let end_pos = self.position;

        LexicalError {
            error: LexicalErrorType::UnrecognizedCharacter { ch },
            location: SrcSpan { start: start_pos, end: end_pos },
        }
    }

    fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut ident = String::new();

        loop {
            match self.ch {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
                    ident.push(self.next_char().expect("lex_ident current char"))
                }
                _ => break,
            }
        }

        let end_pos = self.position;

        // Reserved words are re-tagged here, never reinterpreted later
        let token = match str_to_keyword(&ident) {
            Some(keyword) => keyword,
            None => Token::Ident(ident),
        };

        (start_pos, token, end_pos)
    }

    fn lex_number(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut value = String::new();

        loop {
            match self.ch {
                Some(ch) if ch.is_ascii_digit() => {
                    value.push(self.next_char().expect("lex_number current char"));
                }
                // Floating only when the period sits between digits;
                // `5.` stays an integer and the `.` is left in the stream
                Some('.') if !value.contains('.')
                    && matches!(self.next_ch, Some(next) if next.is_ascii_digit()) =>
                {
                    value.push(self.next_char().expect("lex_number period"));
                }
                _ => break,
            }
        }

        let end_pos = self.position;

        let token = if value.contains('.') {
            Token::Float(value.parse().expect("digits with one period parse as f64"))
        } else {
            match value.parse::<i64>() {
                Ok(value) => Token::Int(value),
                // Digit runs beyond the integer range degrade to floats
                Err(_) => Token::Float(value.parse().expect("digit run parses as f64")),
            }
        };

        (start_pos, token, end_pos)
    }

    fn lex_string(&mut self) -> LexResult {
        let start_pos = self.position;
        let mut contents = String::new();

        self.next_char(); // opening quote

        loop {
            match self.ch {
                Some('"') => {
                    self.next_char();
                    break;
                }
                Some('\\') => {
                    // Escapes pass through verbatim, no translation
                    contents.push(self.next_char().expect("lex_string backslash"));
                    match self.ch {
                        Some(_) => contents.push(self.next_char().expect("lex_string escaped char")),
                        None => {
                            return Err(LexicalError {
                                error: LexicalErrorType::UnterminatedString,
                                location: SrcSpan { start: start_pos, end: self.position },
                            })
                        }
                    }
                }
                Some('\n') | None => {
                    return Err(LexicalError {
                        error: LexicalErrorType::UnterminatedString,
                        location: SrcSpan { start: start_pos, end: self.position },
                    })
                }
                Some(_) => contents.push(self.next_char().expect("lex_string current char")),
            }
        }

        let end_pos = self.position;

        Ok((start_pos, Token::Str(contents), end_pos))
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof {
            return None;
        }

        Some(self.next_token())
    }
}
