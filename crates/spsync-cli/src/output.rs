//! Output formatting for command results

use spsync_core::domain::Failure;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
    /// Bare result strings, failures as `FAIL:<message>` joined by `,`
    Legacy,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// One leaf failure of an operation
    fn failure(&self, failure: &Failure);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn failure(&self, failure: &Failure) {
        eprintln!("\u{2717} {}", failure.message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {}
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn failure(&self, failure: &Failure) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "kind": failure.kind, "error": failure.message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

/// Plain formatter for scripts that parse the legacy result strings
pub struct LegacyFormatter;

impl OutputFormatter for LegacyFormatter {
    fn success(&self, message: &str) {
        println!("{}", message);
    }
    fn error(&self, message: &str) {
        println!("{}", message);
    }
    fn failure(&self, failure: &Failure) {
        println!("{}", failure.to_legacy_string());
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, _value: &serde_json::Value) {}
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Legacy => Box::new(LegacyFormatter),
    }
}
