//! Terminal output.
//!
//! In `--json` mode human-readable lines are suppressed entirely; commands
//! print a single JSON document through [`Output::json`] and errors become
//! `{"error": ...}` on stderr.

use console::{style, StyledObject};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Output {
    mode: Mode,
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        let mode = if json { Mode::Json } else { Mode::Text };
        Self { mode, verbose }
    }

    pub fn is_json(&self) -> bool {
        self.mode == Mode::Json
    }

    pub fn info(&self, msg: &str) {
        self.stdout(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.stdout(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.stderr(style("⚠").yellow(), msg);
    }

    pub fn error(&self, msg: &str) {
        match self.mode {
            Mode::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
            Mode::Text => eprintln!("{} {}", style("✗").red(), style(msg).red()),
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.stderr(style("→").dim(), &style(msg).dim().to_string());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.is_json() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.is_json() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if !self.is_json() {
            println!("  {}", format_row(cols, widths));
        }
    }

    /// Pretty-printed regardless of mode.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{}", doc),
            Err(err) => self.error(&format!("Failed to encode output: {}", err)),
        }
    }

    fn stdout(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.is_json() {
            println!("{} {}", marker, msg);
        }
    }

    fn stderr(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.is_json() {
            eprintln!("{} {}", marker, msg);
        }
    }
}

/// Left-align each column to its width; trailing padding is dropped.
pub fn format_row(cols: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (index, (col, width)) in cols.iter().zip(widths).enumerate() {
        if index > 0 {
            row.push_str("  ");
        }
        row.push_str(&format!("{:<width$}", col, width = *width));
    }
    row.trim_end().to_string()
}
