use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <letter>{<letter>|<digit>|_}
    Ident(String),
    // {/ <digit> /}
    Int(i64),
    // {/ <digit> /}.{/ <digit> /}
    Float(f64),
    // "..." with the quotes stripped
    Str(String),

    // Comparison operations
    Equal,              // ==
    NotEqual,           // !=
    GreaterThanOrEqual, // >=
    LessThanOrEqual,    // <=
    GreaterThan,        // >
    LessThan,           // <

    // Additive operations
    Plus,  // +
    Minus, // -

    // Multiplicative operations
    Asterisk, // *
    Slash,    // /

    // Exponentiation
    Caret, // ^

    // Assignment
    Assign, // =

    // Type keywords
    IntType,     // int
    FloatType,   // float
    StringType,  // string
    BooleanType, // boolean

    // Logical keywords
    And, // and
    Or,  // or

    // Boolean constants
    True,
    False,

    // Control flow keywords
    If,
    Elif,
    Else,
    For,
    While,

    // Output
    Print,

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    Eof,
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "int" => Token::IntType,
        "float" => Token::FloatType,
        "string" => Token::StringType,
        "boolean" => Token::BooleanType,

        "true" => Token::True,
        "false" => Token::False,

        "and" => Token::And,
        "or" => Token::Or,

        "if" => Token::If,
        "elif" => Token::Elif,
        "else" => Token::Else,
        "for" => Token::For,
        "while" => Token::While,

        "print" => Token::Print,

        _ => return None,
    })
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        match self {
            Token::IntType
            | Token::FloatType
            | Token::StringType
            | Token::BooleanType
            | Token::True
            | Token::False
            | Token::And
            | Token::Or
            | Token::If
            | Token::Elif
            | Token::Else
            | Token::For
            | Token::While
            | Token::Print => true,
            _ => false,
        }
    }

    pub fn is_variable_type(&self) -> bool {
        match self {
            Token::IntType
            | Token::FloatType
            | Token::StringType
            | Token::BooleanType => true,
            _ => false,
        }
    }

    pub fn is_operator(&self) -> bool {
        match self {
            Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::Caret
            | Token::And
            | Token::Or
            | Token::Equal
            | Token::NotEqual
            | Token::GreaterThanOrEqual
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::LessThan => true,
            _ => false,
        }
    }

    pub fn is_comparison(&self) -> bool {
        match self {
            Token::Equal
            | Token::NotEqual
            | Token::GreaterThanOrEqual
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::LessThan => true,
            _ => false,
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => format!("{}", value),
            Token::Float(value) => format!("{}", value),
            Token::Str(value) => format!("\"{}\"", value),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::LessThan => "<".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::Assign => "=".to_string(),

            Token::IntType => "int".to_string(),
            Token::FloatType => "float".to_string(),
            Token::StringType => "string".to_string(),
            Token::BooleanType => "boolean".to_string(),

            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),

            Token::If => "if".to_string(),
            Token::Elif => "elif".to_string(),
            Token::Else => "else".to_string(),
            Token::For => "for".to_string(),
            Token::While => "while".to_string(),
            Token::Print => "print".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::Semicolon => ";".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}
