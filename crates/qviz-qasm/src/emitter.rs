//! Emitter for serializing circuits back to the qviz QASM subset.

use qviz_ir::{Circuit, Operation, RegisterTable};

/// Emit a circuit as source text that [`parse`](crate::parse) reads back
/// into an equal circuit.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        self.emit_declarations("qubit", circuit.qubits());
        self.emit_declarations("bit", circuit.classical());

        if !circuit.qubits().is_empty() || !circuit.classical().is_empty() {
            self.writeln("");
        }

        for operation in circuit.operations() {
            self.emit_operation(operation);
        }
    }

    fn emit_declarations(&mut self, keyword: &str, table: &RegisterTable) {
        for (name, width) in table.iter() {
            self.writeln(&format!("{keyword}[{width}] {name};"));
        }
    }

    fn emit_operation(&mut self, operation: &Operation) {
        match operation {
            Operation::Gate { gate, targets } => {
                let operands = targets
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                if operands.is_empty() {
                    self.writeln(&format!("{};", gate.opcode()));
                } else {
                    self.writeln(&format!("{} {operands};", gate.opcode()));
                }
            }
            Operation::Measure { source, target } => {
                self.writeln(&format!("measure {source} -> {target};"));
            }
        }
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}
