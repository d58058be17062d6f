//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};

use qviz_ir::Circuit;
use qviz_qasm::{Diagnostic, ParseOptions, ParseOutput, parse_with_options};
use qviz_render::{LayoutConfig, SvgSurface, render};

/// Contents of the YAML configuration file.
///
/// ```yaml
/// parser:
///   fold_case: false
/// layout:
///   wire_spacing: 50.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QvizConfig {
    pub parser: ParseOptions,
    pub layout: LayoutConfig,
}

/// Load the configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<QvizConfig> {
    let Some(path) = path else {
        return Ok(QvizConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: QvizConfig = serde_yaml_ng::from_str(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Read circuit source text.
pub fn load_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Read and parse a circuit file.
pub fn load_circuit(path: &str, config: &QvizConfig) -> Result<ParseOutput> {
    let source = load_source(path)?;
    Ok(parse_with_options(&source, &config.parser))
}

/// Draw a circuit as an SVG document.
///
/// The surface fits the circuit unless a dimension is given.
pub fn render_svg(
    circuit: &Circuit,
    width: Option<f64>,
    height: Option<f64>,
    config: &QvizConfig,
) -> Result<String> {
    let (fit_width, fit_height) = config.layout.preferred_size(circuit);
    let mut surface = SvgSurface::new(width.unwrap_or(fit_width), height.unwrap_or(fit_height));
    render(&mut surface, circuit, &config.layout).context("Failed to render circuit")?;
    Ok(surface.finish())
}

/// Print diagnostics, one per line.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let marker = if diagnostic.kind().drops_line() {
            style("dropped").red()
        } else {
            style("warning").yellow()
        };
        println!(
            "  {} {:>4}  {}  {}",
            marker,
            style(diagnostic.line).dim(),
            style(diagnostic.kind()).cyan(),
            diagnostic.error
        );
    }
}
