//! Watch command implementation.
//!
//! Polls the input file and re-renders when its text changes and ends in a
//! complete statement. A failed render keeps the last good diagram on disk.

use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use tracing::{debug, info, warn};

use qviz_qasm::{is_complete, parse_with_options};

use super::common::{QvizConfig, load_source, render_svg};

/// What to do with a freshly read version of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Poll {
    /// Same text as last time.
    Unchanged,
    /// Changed, but the last statement is not terminated yet.
    Incomplete,
    /// Changed and complete.
    Render,
}

/// Coalesces file changes into render requests.
#[derive(Debug, Default)]
struct ChangeTracker {
    last: Option<String>,
}

impl ChangeTracker {
    fn poll(&mut self, text: &str) -> Poll {
        if self.last.as_deref() == Some(text) {
            return Poll::Unchanged;
        }
        self.last = Some(text.to_string());
        if is_complete(text) {
            Poll::Render
        } else {
            Poll::Incomplete
        }
    }
}

/// Execute the watch command. Runs until interrupted.
pub fn execute(input: &str, output: &str, interval_ms: u64, config: &QvizConfig) -> Result<()> {
    println!(
        "{} Watching {} → {} (every {} ms, Ctrl-C to stop)",
        style("→").cyan().bold(),
        style(input).green(),
        style(output).green(),
        interval_ms
    );

    // Fail fast if the input is missing at startup.
    load_source(input)?;

    let interval = Duration::from_millis(interval_ms.max(1));
    let mut tracker = ChangeTracker::default();

    loop {
        match load_source(input) {
            Ok(text) => match tracker.poll(&text) {
                Poll::Unchanged => {}
                Poll::Incomplete => debug!("input changed but is incomplete"),
                Poll::Render => {
                    if let Err(e) = render_once(&text, output, config) {
                        warn!("{e:#}; keeping last diagram");
                        eprintln!("{} {:#}", style("✗").red().bold(), e);
                    }
                }
            },
            Err(e) => warn!("{e:#}"),
        }

        thread::sleep(interval);
    }
}

fn render_once(text: &str, output: &str, config: &QvizConfig) -> Result<()> {
    let parsed = parse_with_options(text, &config.parser);
    if !parsed.is_clean() {
        info!(diagnostics = parsed.diagnostics.len(), "rendering partial circuit");
    }

    let svg = render_svg(&parsed.circuit, None, None, config)?;
    fs::write(output, svg).with_context(|| format!("Failed to write file: {output}"))?;

    println!(
        "{} Rendered {} operations",
        style("✓").green().bold(),
        parsed.circuit.num_ops()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_coalesces_changes() {
        let mut tracker = ChangeTracker::default();

        assert_eq!(tracker.poll("qubit[1] q;"), Poll::Render);
        assert_eq!(tracker.poll("qubit[1] q;"), Poll::Unchanged);
        assert_eq!(tracker.poll("qubit[1] q;\nh q[0"), Poll::Incomplete);
        assert_eq!(tracker.poll("qubit[1] q;\nh q[0"), Poll::Unchanged);
        assert_eq!(tracker.poll("qubit[1] q;\nh q[0];"), Poll::Render);
    }

    #[test]
    fn test_failed_render_keeps_last_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.svg");
        let output = output.to_str().unwrap();
        let config = QvizConfig::default();

        render_once("qubit[1] q;\nh q[0];", output, &config).unwrap();
        let good = fs::read_to_string(output).unwrap();

        // Measurement into an undeclared register cannot be laid out.
        assert!(render_once("qubit[1] q;\nmeasure q[0] -> c[0];", output, &config).is_err());
        assert_eq!(fs::read_to_string(output).unwrap(), good);
    }
}
