//! Output formatting for the CLI.

use chrono::{DateTime, Local};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pos_core::checkout::OrderPhase;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a blank line.
    pub fn blank(&self) {
        if self.json {
            return;
        }
        println!();
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a table header and its rule.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        self.table_row(cols, widths);
        let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        println!("  {}", style("-".repeat(rule)).dim());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-align `text` in `width` columns, counting characters rather than bytes.
fn pad(text: &str, width: usize) -> String {
    let len = console::measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Styled stock quantity.
pub fn stock_badge(quantity: i64) -> String {
    match quantity {
        q if q <= 0 => style("agotado").red().to_string(),
        q if q < 5 => style(q.to_string()).yellow().to_string(),
        q => style(q.to_string()).green().to_string(),
    }
}

/// Styled order phase.
pub fn phase_badge(phase: OrderPhase) -> String {
    let label = phase.as_str();
    match phase {
        OrderPhase::Succeeded => style(label).green().to_string(),
        OrderPhase::Submitting => style(label).yellow().to_string(),
        OrderPhase::Failed => style(label).red().to_string(),
        OrderPhase::Empty => style(label).dim().to_string(),
        OrderPhase::Filled => label.to_string(),
    }
}

/// Format an RFC 3339 timestamp in local time, or echo it unchanged.
pub fn format_timestamp(ts: &str) -> String {
    match DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_characters() {
        assert_eq!(pad("Ubicación", 11), "Ubicación  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp("not a date"), "not a date");
        assert_eq!(format_timestamp("2024-03-01T10:00:00Z").len(), 16);
    }
}
