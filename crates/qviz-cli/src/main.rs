//! qviz Command-Line Interface
//!
//! Parses circuit descriptions and draws them as SVG diagrams.
//!
//! ```text
//! q0 ──[H]──●──────(M)──
//!           │       │
//! q1 ──────[CX]─────┼───
//!                   │
//! c0 ═══════════════╧═══
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, common, parse, render, version, watch};

/// qviz - parse quantum circuit text and draw it
#[derive(Parser)]
#[command(name = "qviz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file with `parser` and `layout` sections
    #[arg(long, env = "QVIZ_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a circuit and print its model
    Parse {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Fail if any line produced a diagnostic
        #[arg(long)]
        strict: bool,
    },

    /// Report diagnostics and layout errors without drawing
    Check {
        /// Input file
        #[arg(short, long)]
        input: String,
    },

    /// Render a circuit diagram as SVG
    Render {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Output SVG file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Surface width (fits the circuit if omitted)
        #[arg(long)]
        width: Option<f64>,

        /// Surface height (fits the circuit if omitted)
        #[arg(long)]
        height: Option<f64>,
    },

    /// Re-render whenever the input changes
    Watch {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Output SVG file
        #[arg(short, long)]
        output: String,

        /// Polling interval in milliseconds
        #[arg(long, default_value = "500")]
        interval_ms: u64,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = common::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Parse {
            input,
            format,
            strict,
        } => parse::execute(&input, &format, strict, &config),

        Commands::Check { input } => check::execute(&input, &config),

        Commands::Render {
            input,
            output,
            width,
            height,
        } => render::execute(&input, output.as_deref(), width, height, &config),

        Commands::Watch {
            input,
            output,
            interval_ms,
        } => watch::execute(&input, &output, interval_ms, &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
