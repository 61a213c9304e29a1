//! Output formatting for the CLI.

use clap::ValueEnum;
use mutation_dispatch::Notifier;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as pretty JSON (the `--format json` path).
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => {
            println!(r#"{{"status":"success","message":{}}}"#, json_string(message));
        }
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            eprintln!(r#"{{"status":"error","message":{}}}"#, json_string(message));
        }
    }
}

/// Print a labeled row.
pub fn print_row(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", label), value);
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "-".repeat(50));
}

fn json_string(message: &str) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string())
}

/// Routes mutation notifications to the terminal.
pub struct CliNotifier {
    format: OutputFormat,
}

impl CliNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Notifier for CliNotifier {
    fn success(&self, message: &str) {
        print_success(message, &self.format);
    }

    fn error(&self, message: &str) {
        print_error(message, &self.format);
    }
}
