//! Line-oriented parser for the qviz QASM subset.
//!
//! Every line is classified on its own; there is no statement continuation
//! across lines. Lines that cannot be classified are dropped from the
//! circuit and reported as [`Diagnostic`]s.

mod statement;

use qviz_ir::{Circuit, Operation, RegisterRef, RegisterTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Diagnostic, ParseError};
use statement::{LineParser, RegisterKind, Statement};

/// Parser options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Lower-case the whole line before parsing, register names included.
    ///
    /// When `false`, keywords and opcodes are still matched
    /// case-insensitively but register names keep their case.
    pub fold_case: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { fold_case: true }
    }
}

impl ParseOptions {
    /// Options that keep register-name case.
    pub fn preserve_case() -> Self {
        Self { fold_case: false }
    }
}

/// A best-effort circuit together with everything that went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// The circuit built from every line that could be classified.
    pub circuit: Circuit,
    /// Line-tagged diagnostics in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Whether parsing produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The circuit if there were no diagnostics, the diagnostics otherwise.
    pub fn into_strict(self) -> Result<Circuit, Vec<Diagnostic>> {
        if self.diagnostics.is_empty() {
            Ok(self.circuit)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// Parse source text into a circuit, silently dropping lines that cannot
/// be classified.
pub fn parse(source: &str) -> Circuit {
    parse_with_diagnostics(source).circuit
}

/// Parse source text, reporting every dropped or suspicious line.
///
/// The returned circuit is identical to the one [`parse`] builds.
pub fn parse_with_diagnostics(source: &str) -> ParseOutput {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse source text with explicit options.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> ParseOutput {
    let mut builder = CircuitBuilder::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = if options.fold_case {
            raw.trim().to_lowercase()
        } else {
            raw.trim().to_string()
        };

        if is_ignored(&line) {
            trace!(line = line_no, "skipping blank, comment or pragma line");
            continue;
        }

        match LineParser::new(&line).and_then(|mut parser| parser.parse_statement()) {
            Ok(Some(statement)) => {
                trace!(line = line_no, ?statement, "classified line");
                builder.apply(line_no, statement);
            }
            Ok(None) => {}
            Err(error) => {
                debug!(line = line_no, %error, "dropping line");
                builder.report(line_no, error);
            }
        }
    }

    let output = builder.finish();
    debug!(
        qubits = output.circuit.num_qubits(),
        clbits = output.circuit.num_clbits(),
        ops = output.circuit.num_ops(),
        diagnostics = output.diagnostics.len(),
        "parsed circuit"
    );
    output
}

/// Whether the editor text ends in a complete statement and is worth
/// re-parsing.
pub fn is_complete(source: &str) -> bool {
    source.trim_end().ends_with(';')
}

/// Blank lines, comments, version and include pragmas.
fn is_ignored(line: &str) -> bool {
    if line.is_empty() || line.starts_with("//") {
        return true;
    }
    let lower = line.get(..8).unwrap_or(line).to_ascii_lowercase();
    lower.starts_with("openqasm") || lower.starts_with("include")
}

/// Accumulates the circuit and diagnostics line by line.
#[derive(Default)]
struct CircuitBuilder {
    circuit: Circuit,
    diagnostics: Vec<Diagnostic>,
}

impl CircuitBuilder {
    fn apply(&mut self, line: usize, statement: Statement) {
        match statement {
            Statement::Declaration { kind, name, width } => {
                let previous = match kind {
                    RegisterKind::Quantum => self.circuit.add_qreg(name.clone(), width),
                    RegisterKind::Classical => self.circuit.add_creg(name.clone(), width),
                };
                if previous.is_some() {
                    self.report(line, ParseError::DuplicateDeclaration(name));
                }
            }
            Statement::Operation(operation) => {
                self.check_references(line, &operation);
                self.circuit.push(operation);
            }
        }
    }

    /// Report references to registers not declared so far, or past their
    /// width. The operation itself is kept.
    fn check_references(&mut self, line: usize, operation: &Operation) {
        let mut errors = Vec::new();
        let mut check = |table: &RegisterTable, reference: &RegisterRef| {
            if let Err(err) = table.check(reference) {
                errors.push(ParseError::UnresolvedRegister(err));
            }
        };

        match operation {
            Operation::Gate { targets, .. } => {
                for target in targets {
                    check(self.circuit.qubits(), target);
                }
            }
            Operation::Measure { source, target } => {
                check(self.circuit.qubits(), source);
                check(self.circuit.classical(), target);
            }
        }

        for error in errors {
            self.report(line, error);
        }
    }

    fn report(&mut self, line: usize, error: ParseError) {
        self.diagnostics.push(Diagnostic { line, error });
    }

    fn finish(self) -> ParseOutput {
        ParseOutput {
            circuit: self.circuit,
            diagnostics: self.diagnostics,
        }
    }
}
