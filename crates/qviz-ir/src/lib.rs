//! qviz Circuit Model
//!
//! This crate holds the data structures passed from the QASM parser to the
//! diagram renderer. A [`Circuit`] is built fresh on every parse and is
//! never mutated by the renderer.
//!
//! # Core Components
//!
//! - **Registers**: [`RegisterTable`] keeps `name → width` in declaration
//!   order; [`RegisterRef`] names a whole register or one of its wires
//! - **Operations**: [`Operation`] is either a gate ([`GateName`]) on one or
//!   more references, or a measurement from a qubit to a classical bit
//! - **Circuit**: [`Circuit`] with a small builder API
//!
//! # Wire numbering
//!
//! Wires are numbered globally in declaration order: the wire of `b[1]` in
//! `qubit[2] a; qubit[2] b;` is `2 + 1 = 3`. Classical wires are numbered
//! independently, starting from zero.
//!
//! ```rust
//! use qviz_ir::{Circuit, RegisterRef};
//!
//! let mut circuit = Circuit::new();
//! circuit.add_qreg("a", 2);
//! circuit.add_qreg("b", 2);
//! circuit.cx(RegisterRef::single("a", 0), RegisterRef::single("b", 1));
//!
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.qubit_wires(&RegisterRef::single("b", 1)).unwrap(), 3..4);
//! ```
//!
//! # Serialization
//!
//! Circuits serialize to the JSON shape used by visualization backends:
//!
//! ```rust
//! use qviz_ir::Circuit;
//!
//! let json = Circuit::bell().to_json().unwrap();
//! assert!(json.contains("\"qubits\""));
//! assert!(json.contains("\"measure\""));
//! ```

pub mod circuit;
pub mod error;
pub mod operation;
pub mod register;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use operation::{GateName, Operation};
pub use register::{RegisterRef, RegisterTable};
