//! Parse command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use qviz_ir::Circuit;
use qviz_qasm::ParseOutput;

use super::common::{QvizConfig, load_circuit, print_diagnostics};

/// Execute the parse command.
pub fn execute(input: &str, format: &str, strict: bool, config: &QvizConfig) -> Result<()> {
    let output = load_circuit(input, config)?;

    match format {
        "json" => print_json(&output)?,
        "table" => print_table(input, &output),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    if strict && !output.is_clean() {
        anyhow::bail!(
            "{} diagnostic(s) in {input} (strict mode)",
            output.diagnostics.len()
        );
    }

    Ok(())
}

fn print_json(output: &ParseOutput) -> Result<()> {
    let diagnostics: Vec<_> = output
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "line": d.line,
                "kind": d.kind(),
                "message": d.error.to_string(),
            })
        })
        .collect();

    let value = json!({
        "circuit": output.circuit,
        "diagnostics": diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_table(input: &str, output: &ParseOutput) {
    let circuit = &output.circuit;
    println!(
        "{} Parsed {}: {} qubits, {} classical bits, {} operations",
        style("→").cyan().bold(),
        style(input).green(),
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.num_ops()
    );

    print_registers(circuit);
    println!();

    for (idx, operation) in circuit.operations().iter().enumerate() {
        println!("  {:>4}  {}", style(idx).dim(), operation);
    }

    if !output.is_clean() {
        println!();
        println!(
            "{} {} diagnostic(s):",
            style("!").yellow().bold(),
            output.diagnostics.len()
        );
        print_diagnostics(&output.diagnostics);
    }
}

fn print_registers(circuit: &Circuit) {
    for (name, width) in circuit.qubits().iter() {
        println!("  qubit[{width}] {}", style(name).cyan());
    }
    for (name, width) in circuit.classical().iter() {
        println!("  bit[{width}] {}", style(name).cyan());
    }
}
