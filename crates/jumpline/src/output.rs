//! Output formatting for jump results.
//!
//! Supports both human-readable terminal output and JSON for editor
//! integrations.

use jumpline_core::{JumpOutcome, Side};
use serde::Serialize;

/// JSON output structure for a jump
#[derive(Serialize)]
pub struct JsonJump {
    pub from: Side,
    pub to: Side,
    /// 1-based line the jump started from
    pub line: usize,
    /// 1-based landing line
    pub target: usize,
    /// Landing line counted from zero
    pub target_zero_based: usize,
    /// False when no mapping existed and `target` echoes `line`
    pub mapped: bool,
}

impl From<&JumpOutcome> for JsonJump {
    fn from(outcome: &JumpOutcome) -> Self {
        Self {
            from: outcome.from,
            to: outcome.to,
            line: outcome.line,
            target: outcome.target_line(),
            target_zero_based: outcome.target_zero_based(),
            mapped: outcome.target.is_mapped(),
        }
    }
}

/// Formats a jump as JSON.
pub fn format_json(outcome: &JumpOutcome) -> String {
    serde_json::to_string_pretty(&JsonJump::from(outcome)).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a jump for the terminal.
pub fn format_human(outcome: &JumpOutcome) -> String {
    let mut output = format!(
        "{}:{} -> {}:{}",
        outcome.from,
        outcome.line,
        outcome.to,
        outcome.target_line()
    );
    if !outcome.target.is_mapped() {
        output.push_str(" (no corresponding line, kept line number)");
    }
    output
}
