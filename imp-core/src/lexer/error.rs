use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedCharacter { ch: char },
    UnterminatedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan,
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedCharacter { ch } => (
                "Illegal character",
                vec![format!("`{ch}` matches no token pattern; it was skipped")],
            ),
            LexicalErrorType::UnterminatedString => (
                "Unterminated string literal",
                vec!["A string must be closed with `\"` on the same line".to_string()],
            ),
        }
    }
}
