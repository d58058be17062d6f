//! The circuit model and its builder API.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::operation::{GateName, Operation};
use crate::register::{RegisterRef, RegisterTable};

/// A parsed circuit.
///
/// Registers are kept in declaration order; `operations` are kept in source
/// order, which is also the left-to-right drawing order. References are
/// stored as written and only resolved to wires on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Quantum registers: name -> width.
    qubits: RegisterTable,
    /// Classical registers: name -> width.
    classical: RegisterTable,
    /// Operations in temporal order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-qubit Bell circuit with one measured bit, as produced by
    /// `qubit[2] q; bit[1] c; h q[0]; cx q[0], q[1]; measure q[0] -> c[0];`.
    pub fn bell() -> Self {
        let mut circuit = Self::new();
        circuit.add_qreg("q", 2);
        circuit.add_creg("c", 1);
        circuit
            .h(RegisterRef::single("q", 0))
            .cx(RegisterRef::single("q", 0), RegisterRef::single("q", 1))
            .measure(RegisterRef::single("q", 0), RegisterRef::single("c", 0));
        circuit
    }

    /// Declare a quantum register. Returns the previous width if the name
    /// was already declared.
    pub fn add_qreg(&mut self, name: impl Into<String>, width: u32) -> Option<u32> {
        self.qubits.insert(name, width)
    }

    /// Declare a classical register. Returns the previous width if the name
    /// was already declared.
    pub fn add_creg(&mut self, name: impl Into<String>, width: u32) -> Option<u32> {
        self.classical.insert(name, width)
    }

    /// Append an operation.
    pub fn push(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, target: RegisterRef) -> &mut Self {
        self.push(Operation::gate(GateName::H, [target]))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, target: RegisterRef) -> &mut Self {
        self.push(Operation::gate(GateName::X, [target]))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, target: RegisterRef) -> &mut Self {
        self.push(Operation::gate(GateName::Y, [target]))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, target: RegisterRef) -> &mut Self {
        self.push(Operation::gate(GateName::Z, [target]))
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: RegisterRef, target: RegisterRef) -> &mut Self {
        self.push(Operation::gate(GateName::CX, [control, target]))
    }

    /// Measure `source` into `target`.
    pub fn measure(&mut self, source: RegisterRef, target: RegisterRef) -> &mut Self {
        self.push(Operation::measure(source, target))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Quantum registers in declaration order.
    pub fn qubits(&self) -> &RegisterTable {
        &self.qubits
    }

    /// Classical registers in declaration order.
    pub fn classical(&self) -> &RegisterTable {
        &self.classical
    }

    /// Operations in temporal order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of qubit wires.
    pub fn num_qubits(&self) -> u64 {
        self.qubits.total_width()
    }

    /// Total number of classical wires.
    pub fn num_clbits(&self) -> u64 {
        self.classical.total_width()
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.operations.len()
    }

    /// Whether the circuit declares nothing and does nothing.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty() && self.classical.is_empty() && self.operations.is_empty()
    }

    /// Flat qubit wires covered by a reference.
    pub fn qubit_wires(&self, reference: &RegisterRef) -> IrResult<Range<u32>> {
        self.qubits.resolve(reference)
    }

    /// Flat classical wires covered by a reference (numbered independently
    /// of qubit wires).
    pub fn clbit_wires(&self, reference: &RegisterRef) -> IrResult<Range<u32>> {
        self.classical.resolve(reference)
    }

    /// Check that every reference names a declared register and stays in
    /// bounds. Gate operands and measurement sources must be quantum,
    /// measurement targets classical.
    pub fn validate(&self) -> IrResult<()> {
        for operation in &self.operations {
            match operation {
                Operation::Gate { targets, .. } => {
                    for target in targets {
                        self.qubits.check(target)?;
                    }
                }
                Operation::Measure { source, target } => {
                    self.qubits.check(source)?;
                    self.classical.check(target)?;
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize to the JSON shape consumed by visualization backends.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
