//! Error and diagnostic types for the QASM parser.

use std::fmt;

use qviz_ir::IrError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while parsing one line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at column {column}: invalid token '{text}'")]
    LexerError { column: usize, text: String },

    /// Opcode outside the supported set.
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    /// Declaration line that does not match `qubit[N] name;` / `bit[N] name;`.
    #[error("Malformed declaration: {0}")]
    MalformedDeclaration(String),

    /// Measurement line that is not `measure <qubit> -> <bit>;`.
    #[error("Malformed measurement: {0}")]
    MalformedMeasurement(String),

    /// Operand that is neither `name` nor `name[k]`.
    #[error("Invalid register reference: {0}")]
    InvalidRegisterRef(String),

    /// Register declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Unexpected token.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Reference to an undeclared register or past its width.
    #[error("Unresolved register: {0}")]
    UnresolvedRegister(#[from] IrError),
}

impl ParseError {
    /// Coarse classification used in diagnostics.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::LexerError { .. } | ParseError::UnexpectedToken { .. } => {
                DiagnosticKind::Syntax
            }
            ParseError::UnknownOpcode(_) => DiagnosticKind::UnknownOpcode,
            ParseError::MalformedDeclaration(_) => DiagnosticKind::MalformedDeclaration,
            ParseError::MalformedMeasurement(_) => DiagnosticKind::MalformedMeasurement,
            ParseError::InvalidRegisterRef(_) => DiagnosticKind::InvalidRegisterRef,
            ParseError::DuplicateDeclaration(_) => DiagnosticKind::DuplicateDeclaration,
            ParseError::UnresolvedRegister(_) => DiagnosticKind::UnresolvedRegister,
        }
    }
}

/// Kind of a diagnostic, independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Syntax,
    UnknownOpcode,
    MalformedDeclaration,
    MalformedMeasurement,
    InvalidRegisterRef,
    DuplicateDeclaration,
    UnresolvedRegister,
}

impl DiagnosticKind {
    /// Whether the offending line was dropped from the circuit.
    ///
    /// Duplicate declarations and unresolved references are reported but
    /// the line still contributes to the circuit.
    pub fn drops_line(self) -> bool {
        !matches!(
            self,
            DiagnosticKind::DuplicateDeclaration | DiagnosticKind::UnresolvedRegister
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::UnknownOpcode => "unknown-opcode",
            DiagnosticKind::MalformedDeclaration => "malformed-declaration",
            DiagnosticKind::MalformedMeasurement => "malformed-measurement",
            DiagnosticKind::InvalidRegisterRef => "invalid-register-ref",
            DiagnosticKind::DuplicateDeclaration => "duplicate-declaration",
            DiagnosticKind::UnresolvedRegister => "unresolved-register",
        };
        f.write_str(name)
    }
}

/// A parse error tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// What went wrong.
    pub error: ParseError,
}

impl Diagnostic {
    /// Kind of the underlying error.
    pub fn kind(&self) -> DiagnosticKind {
        self.error.kind()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Result type for line-level parsing.
pub type ParseResult<T> = Result<T, ParseError>;
