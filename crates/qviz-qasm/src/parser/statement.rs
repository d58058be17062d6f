//! Statement parsing for a single line.

use qviz_ir::{GateName, Operation, RegisterRef};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Register kind introduced by a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RegisterKind {
    Quantum,
    Classical,
}

/// One classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Statement {
    /// `qubit[N] name;` or `bit[N] name;`
    Declaration {
        kind: RegisterKind,
        name: String,
        width: u32,
    },
    /// Gate or measurement.
    Operation(Operation),
}

/// Parser state for one line.
pub(super) struct LineParser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl<'a> LineParser<'a> {
    /// Tokenize a line. A lexer failure is reported against the statement
    /// the line's leading word introduces.
    pub(super) fn new(source: &'a str) -> ParseResult<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source).map_err(|error| classify_lexer_error(source, error))?,
            pos: 0,
        })
    }

    /// Check if we've reached the end of the line.
    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Check if current token matches.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Text of the current token, or `end of line`.
    fn found(&self) -> String {
        self.peek()
            .map_or_else(|| "end of line".to_string(), ToString::to_string)
    }

    /// Parse the whole line. Blank lines (after comment removal) yield `None`.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let Some(token) = self.advance() else {
            return Ok(None);
        };

        let Token::Identifier(word) = token else {
            return Err(ParseError::UnexpectedToken {
                expected: "statement".into(),
                found: token.to_string(),
            });
        };

        let keyword = word.to_ascii_lowercase();
        let statement = match keyword.as_str() {
            "qubit" => self.parse_declaration(RegisterKind::Quantum)?,
            "bit" => self.parse_declaration(RegisterKind::Classical)?,
            "measure" => self.parse_measure()?,
            opcode => match GateName::from_opcode(opcode) {
                Some(gate) => self.parse_gate(gate)?,
                None if self.check(&Token::Eq) || self.check(&Token::LBracket) => {
                    self.parse_measure_assignment(word)?
                }
                None => return Err(ParseError::UnknownOpcode(keyword)),
            },
        };

        Ok(Some(statement))
    }

    /// Parse the rest of a declaration: `[N] name;` or `name;`.
    fn parse_declaration(&mut self, kind: RegisterKind) -> ParseResult<Statement> {
        let line = self.source;
        let malformed = || ParseError::MalformedDeclaration(line.trim().to_string());

        let width = if self.consume(&Token::LBracket) {
            let Some(Token::IntLiteral(width)) = self.advance() else {
                return Err(malformed());
            };
            if !self.consume(&Token::RBracket) {
                return Err(malformed());
            }
            width
        } else {
            1
        };

        let Some(Token::Identifier(name)) = self.advance() else {
            return Err(malformed());
        };

        self.consume(&Token::Semicolon);
        if !self.is_eof() {
            return Err(malformed());
        }

        Ok(Statement::Declaration { kind, name, width })
    }

    /// Parse the rest of `measure <source> -> <target>;`.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        let line = self.source;
        let malformed = || ParseError::MalformedMeasurement(line.trim().to_string());

        let source = self.parse_register_ref().map_err(|_| malformed())?;
        if !self.consume(&Token::Arrow) {
            return Err(malformed());
        }
        let target = self.parse_register_ref().map_err(|_| malformed())?;

        self.consume(&Token::Semicolon);
        if !self.is_eof() {
            return Err(malformed());
        }

        Ok(Statement::Operation(Operation::measure(source, target)))
    }

    /// Parse the OpenQASM 3 assignment form `c[0] = measure q[0];`, with the
    /// target register name already consumed.
    fn parse_measure_assignment(&mut self, register: String) -> ParseResult<Statement> {
        let line = self.source;
        let malformed = || ParseError::MalformedMeasurement(line.trim().to_string());

        let index = if self.consume(&Token::LBracket) {
            let Some(Token::IntLiteral(index)) = self.advance() else {
                return Err(malformed());
            };
            if !self.consume(&Token::RBracket) {
                return Err(malformed());
            }
            Some(index)
        } else {
            None
        };
        let target = RegisterRef { register, index };

        if !self.consume(&Token::Eq) {
            return Err(malformed());
        }
        match self.advance() {
            Some(Token::Identifier(word)) if word.eq_ignore_ascii_case("measure") => {}
            _ => return Err(malformed()),
        }

        let source = self.parse_register_ref().map_err(|_| malformed())?;
        self.consume(&Token::Semicolon);
        if !self.is_eof() {
            return Err(malformed());
        }

        Ok(Statement::Operation(Operation::measure(source, target)))
    }

    /// Parse gate operands: references separated by optional commas.
    fn parse_gate(&mut self, gate: GateName) -> ParseResult<Statement> {
        let mut targets = Vec::new();

        while !self.is_eof() && !self.check(&Token::Semicolon) {
            targets.push(self.parse_register_ref()?);
            self.consume(&Token::Comma);
        }

        self.consume(&Token::Semicolon);
        if !self.is_eof() {
            return Err(ParseError::UnexpectedToken {
                expected: "end of line".into(),
                found: self.found(),
            });
        }

        Ok(Statement::Operation(Operation::gate(gate, targets)))
    }

    /// Parse `name` or `name[k]`.
    fn parse_register_ref(&mut self) -> ParseResult<RegisterRef> {
        let register = match self.advance() {
            Some(Token::Identifier(name)) => name,
            Some(other) => return Err(ParseError::InvalidRegisterRef(other.to_string())),
            None => return Err(ParseError::InvalidRegisterRef("end of line".into())),
        };

        if !self.consume(&Token::LBracket) {
            return Ok(RegisterRef::register(register));
        }

        let index = match self.advance() {
            Some(Token::IntLiteral(index)) => index,
            Some(other) => {
                return Err(ParseError::InvalidRegisterRef(format!("{register}[{other}")));
            }
            None => return Err(ParseError::InvalidRegisterRef(format!("{register}["))),
        };

        if !self.consume(&Token::RBracket) {
            return Err(ParseError::InvalidRegisterRef(format!(
                "{register}[{index} (expected ']', found {})",
                self.found()
            )));
        }

        Ok(RegisterRef::single(register, index))
    }
}

/// Map a lexer failure to the error of the statement the leading word
/// announces. Lines without a leading word keep the lexer error.
fn classify_lexer_error(source: &str, error: ParseError) -> ParseError {
    let line = source.trim();
    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    let (word, rest) = line.split_at(end);
    if !word.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return error;
    }

    let keyword = word.to_ascii_lowercase();
    match keyword.as_str() {
        "qubit" | "bit" => ParseError::MalformedDeclaration(line.to_string()),
        "measure" => ParseError::MalformedMeasurement(line.to_string()),
        opcode if GateName::from_opcode(opcode).is_some() => {
            ParseError::InvalidRegisterRef(rest.trim().trim_end_matches(';').to_string())
        }
        _ if rest.trim_start().starts_with(['=', '[']) => {
            ParseError::MalformedMeasurement(line.to_string())
        }
        _ => ParseError::UnknownOpcode(keyword),
    }
}
