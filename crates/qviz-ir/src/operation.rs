//! Circuit operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::register::RegisterRef;

/// Gates the diagram understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateName {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
}

impl GateName {
    /// All supported gates.
    pub const ALL: [GateName; 5] = [
        GateName::H,
        GateName::X,
        GateName::Y,
        GateName::Z,
        GateName::CX,
    ];

    /// Look up a gate by its (lower-case) QASM opcode.
    pub fn from_opcode(opcode: &str) -> Option<Self> {
        match opcode {
            "h" => Some(GateName::H),
            "x" => Some(GateName::X),
            "y" => Some(GateName::Y),
            "z" => Some(GateName::Z),
            "cx" => Some(GateName::CX),
            _ => None,
        }
    }

    /// QASM opcode.
    pub fn opcode(self) -> &'static str {
        match self {
            GateName::H => "h",
            GateName::X => "x",
            GateName::Y => "y",
            GateName::Z => "z",
            GateName::CX => "cx",
        }
    }

    /// Label drawn inside the gate box.
    pub fn label(self) -> &'static str {
        match self {
            GateName::H => "H",
            GateName::X => "X",
            GateName::Y => "Y",
            GateName::Z => "Z",
            GateName::CX => "CX",
        }
    }

    /// Whether the first operand is drawn as a control.
    pub fn is_controlled(self) -> bool {
        matches!(self, GateName::CX)
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode())
    }
}

/// A single step of the circuit, in drawing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Gate applied to one or more register references.
    Gate {
        /// The gate.
        gate: GateName,
        /// Operands, in source order.
        targets: Vec<RegisterRef>,
    },
    /// Measurement of a qubit reference into a classical reference.
    Measure {
        /// Measured qubit(s).
        source: RegisterRef,
        /// Classical bit(s) receiving the result.
        target: RegisterRef,
    },
}

impl Operation {
    /// Create a gate operation.
    pub fn gate(gate: GateName, targets: impl IntoIterator<Item = RegisterRef>) -> Self {
        Operation::Gate {
            gate,
            targets: targets.into_iter().collect(),
        }
    }

    /// Create a measurement operation.
    pub fn measure(source: RegisterRef, target: RegisterRef) -> Self {
        Operation::Measure { source, target }
    }

    /// Opcode as written in QASM.
    pub fn opcode(&self) -> &'static str {
        match self {
            Operation::Gate { gate, .. } => gate.opcode(),
            Operation::Measure { .. } => "measure",
        }
    }

    /// Whether this is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { gate, targets } => {
                write!(f, "{gate}")?;
                for (i, target) in targets.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{target}")?;
                }
                Ok(())
            }
            Operation::Measure { source, target } => write!(f, "measure {source} -> {target}"),
        }
    }
}
