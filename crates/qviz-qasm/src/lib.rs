//! `OpenQASM` 3 Subset Parser and Emitter for qviz
//!
//! This crate reads the small, line-oriented QASM dialect accepted by the
//! qviz editor and turns it into a [`qviz_ir::Circuit`]. Parsing never
//! fails: lines that cannot be classified are dropped, and the
//! diagnostics-aware entry points report each one with its line number.
//!
//! # Supported Features
//!
//! | Feature | Status | Example |
//! |---------|--------|---------|
//! | Version declaration | ignored | `OPENQASM 3.0;` |
//! | Includes | ignored | `include "stdgates.inc";` |
//! | Qubit declarations | ✅ | `qubit[5] q;`, `qubit a;` |
//! | Classical bits | ✅ | `bit[5] c;` |
//! | Gates | ✅ | `h q[0];`, `cx q[0], q[1];` |
//! | Whole-register operands | ✅ | `h q;` |
//! | Measurements | ✅ | `measure q[0] -> c[0];`, `c[0] = measure q[0];` |
//! | Comments | ✅ | `// comment` |
//! | Parameterized gates | ❌ | `rx(pi/4) q[0];` |
//!
//! Supported gates: `h`, `x`, `y`, `z`, `cx`.
//!
//! # Example: Parsing QASM
//!
//! ```rust
//! use qviz_qasm::parse;
//!
//! let qasm = r#"
//!     OPENQASM 3.0;
//!     qubit[2] q;
//!     bit[1] c;
//!     h q[0];
//!     cx q[0], q[1];
//!     measure q[0] -> c[0];
//! "#;
//!
//! let circuit = parse(qasm);
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 3);
//! ```
//!
//! # Example: Diagnostics
//!
//! ```rust
//! use qviz_qasm::{DiagnosticKind, parse_with_diagnostics};
//!
//! let output = parse_with_diagnostics("qubit[1] q;\nrz q[0];\nh q[0];");
//! assert_eq!(output.circuit.num_ops(), 1);
//! assert_eq!(output.diagnostics[0].line, 2);
//! assert_eq!(output.diagnostics[0].kind(), DiagnosticKind::UnknownOpcode);
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qviz_ir::Circuit;
//! use qviz_qasm::{emit, parse};
//!
//! let circuit = Circuit::bell();
//! assert_eq!(parse(&emit(&circuit)), circuit);
//! ```

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{Diagnostic, DiagnosticKind, ParseError, ParseResult};
pub use parser::{
    ParseOptions, ParseOutput, is_complete, parse, parse_with_diagnostics, parse_with_options,
};
