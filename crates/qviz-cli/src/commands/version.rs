//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - live quantum circuit diagrams",
        style("qviz").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qviz-ir      Circuit model");
    println!("  qviz-qasm    Line-oriented QASM parser and emitter");
    println!("  qviz-render  Diagram layout and drawing surfaces");
    println!("  qviz-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
