//! Render command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use tracing::warn;

use super::common::{QvizConfig, load_circuit, render_svg};

/// Execute the render command.
pub fn execute(
    input: &str,
    output: Option<&str>,
    width: Option<f64>,
    height: Option<f64>,
    config: &QvizConfig,
) -> Result<()> {
    let parsed = load_circuit(input, config)?;
    for diagnostic in &parsed.diagnostics {
        warn!("{input}: {diagnostic}");
    }

    let svg = render_svg(&parsed.circuit, width, height, config)?;

    match output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!(
                "{} Rendered {} operations to {}",
                style("✓").green().bold(),
                parsed.circuit.num_ops(),
                style(path).green()
            );
        }
        None => print!("{svg}"),
    }

    Ok(())
}
