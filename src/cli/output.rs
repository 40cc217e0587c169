//! Output formatting module for sdaf-hosts
//!
//! Provides colored status messages and structured JSON/YAML output.

use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Selected output format
    format: OutputFormat,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, format: OutputFormat, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();
        colored::control::set_override(use_color);

        Self {
            use_color,
            format,
            verbosity,
        }
    }

    /// Whether output is structured (JSON or YAML)
    pub fn is_structured(&self) -> bool {
        self.format != OutputFormat::Human
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.is_structured() {
            return;
        }

        if self.use_color {
            println!("{}", title.cyan().bold());
            println!("{}", "-".repeat(title.len()).cyan());
        } else {
            println!("{}", title);
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Print raw lines, one per line, with no decoration
    pub fn lines(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }

    /// Print a value in the selected structured format
    pub fn structured<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            OutputFormat::Human => {}
        }
        Ok(())
    }

    /// Print a final pass/fail status line
    pub fn status(&self, ok: bool, message: &str) {
        if self.is_structured() {
            return;
        }

        let marker = if ok { "OK:" } else { "FAILED:" };
        if self.use_color {
            let marker = if ok {
                marker.green().bold()
            } else {
                marker.red().bold()
            };
            println!("{} {}", marker, message);
        } else {
            println!("{} {}", marker, message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.is_structured() {
            self.structured_message("error", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.is_structured() {
            self.structured_message("warning", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print an info message (respects verbosity)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 {
            return;
        }

        if self.is_structured() {
            self.structured_message("info", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "INFO:".blue(), message);
        } else {
            eprintln!("INFO: {}", message);
        }
    }

    /// Structured diagnostics always go to stderr as single-line JSON so
    /// that stdout stays parseable.
    fn structured_message(&self, kind: &str, message: &str) {
        let msg = serde_json::json!({
            "type": kind,
            "message": message
        });
        eprintln!("{}", msg);
    }
}
