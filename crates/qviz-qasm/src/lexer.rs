//! Per-line lexer.

use logos::Logos;

use crate::error::ParseError;

/// Tokens of a single statement line.
///
/// Keywords are lexed as identifiers and classified by the parser, so that
/// keyword matching stays case-insensitive even when register names keep
/// their case.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    IntLiteral(u32),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[token("->")]
    Arrow,

    #[token("=")]
    Eq,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Arrow => write!(f, "->"),
            Token::Eq => write!(f, "="),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
        }
    }
}

/// A token with its byte span in the line.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    #[allow(dead_code)]
    pub span: std::ops::Range<usize>,
}

/// Tokenize one line, stopping at the first invalid token.
pub fn tokenize(line: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(SpannedToken { token, span }),
            Err(()) => {
                return Err(ParseError::LexerError {
                    column: span.start + 1,
                    text: line[span].to_string(),
                });
            }
        }
    }

    Ok(tokens)
}
