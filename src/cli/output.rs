//! CLI output formatting

use crate::core::validate::ValidationReport;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Print a validation report entry by entry
pub fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("  {} {}", CROSS, style(error).red());
    }
    for warning in &report.warnings {
        println!("  {} {}", WARN, style(warning).yellow());
    }
}

/// Format one line of an execution plan
pub fn format_plan_entry(position: usize, name: &str, depends: &[String]) -> String {
    if depends.is_empty() {
        format!("  {}. {}", position, style(name).cyan())
    } else {
        format!(
            "  {}. {} {}",
            position,
            style(name).cyan(),
            style(format!("(after {})", depends.join(", "))).dim()
        )
    }
}
