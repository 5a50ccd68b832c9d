//! Output normalization for generated Markdown
//!
//! The generated text is rendered again downstream, so blank-line runs
//! are collapsed and the ends trimmed before it leaves the engine.
//! Nothing else is rewritten: list markers, indentation, and all other
//! structure pass through untouched.

/// Collapse blank lines and trim the ends.
///
/// Whitespace-only lines are dropped entirely, so any run of blank lines
/// collapses to a single newline between the surrounding content lines.
/// Idempotent, and never increases the number of non-blank lines.
pub fn normalize(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
