//! Check command implementation.

use anyhow::Result;
use console::style;

use qviz_render::compute_layout;

use super::common::{QvizConfig, load_circuit, print_diagnostics};

/// Execute the check command.
///
/// Fails if the source produced any diagnostic or cannot be laid out.
pub fn execute(input: &str, config: &QvizConfig) -> Result<()> {
    let output = load_circuit(input, config)?;
    let (width, height) = config.layout.preferred_size(&output.circuit);
    let layout = compute_layout(&output.circuit, width, height, &config.layout);

    if output.is_clean() && layout.is_ok() {
        println!(
            "{} {} is clean ({} operations)",
            style("✓").green().bold(),
            style(input).green(),
            output.circuit.num_ops()
        );
        return Ok(());
    }

    if !output.is_clean() {
        println!(
            "{} {} diagnostic(s) in {}:",
            style("!").yellow().bold(),
            output.diagnostics.len(),
            style(input).green()
        );
        print_diagnostics(&output.diagnostics);
    }

    match layout {
        Ok(_) => anyhow::bail!("{} diagnostic(s)", output.diagnostics.len()),
        Err(e) => Err(anyhow::Error::new(e).context(format!("{input} cannot be rendered"))),
    }
}
