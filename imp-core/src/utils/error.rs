use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError,
    },
    #[error("failed to lex source code")]
    Lex {
        path: PathBuf,
        src: String,
        errors: Vec<LexicalError>,
    },
    #[error("evaluation reported problems")]
    Runtime {
        path: PathBuf,
        src: String,
        errors: Vec<RuntimeError>,
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind,
    },
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                // Eof errors point past the end of the source
                let adjusted_location = if matches!(error.error, ParseErrorType::UnexpectedEof) {
                    SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    }
                } else {
                    error.span
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            }
            Error::Lex { path, src, errors } => errors
                .iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    Diagnostic {
                        title: "Lexical error".into(),
                        text: extra.join("\n"),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label.to_string()),
                                span: error.location,
                            },
                            extra_labels: vec![],
                        }),
                    }
                })
                .collect(),
            Error::Runtime { path, src, errors } => errors
                .iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    Diagnostic {
                        title: "Evaluation error".into(),
                        text: extra.join("\n"),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label.to_string()),
                                span: error.location,
                            },
                            extra_labels: vec![],
                        }),
                    }
                })
                .collect(),
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    location: None,
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::parser::prelude::parse_program;

    #[test]
    fn test_parse_error_renders_as_error() {
        let src = "int x = ;".to_string();
        let error = parse_program(&src).expect_err("input should not parse");

        let pretty = Error::Parse {
            path: "main.imp".into(),
            src,
            error,
        }
        .pretty_string();

        assert!(pretty.starts_with("error: Syntax error"));
        assert!(pretty.contains("main.imp"));
    }
}
