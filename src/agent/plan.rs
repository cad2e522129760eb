//! Plan-line classification.
//!
//! Plans are free text. A line references a tool when the tool's name occurs
//! anywhere in it, ignoring case; a line may reference several tools and each
//! is dispatched independently. The argument is the line with the first
//! occurrence of the tool name removed and whitespace, `:` and `-` trimmed
//! from both ends. Any other punctuation is kept as written.

use std::ops::Range;

/// What a plan line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Invoke `tool` (its registered name) with `argument`.
    ToolInvocation { tool: String, argument: String },
    /// The line references no registered tool.
    Unmatched(String),
}

/// Split a plan into lines and classify each, preserving order.
pub fn parse_plan(plan: &str, tool_names: &[&str]) -> Vec<PlanStep> {
    plan.split('\n')
        .flat_map(|line| classify_line(line, tool_names))
        .collect()
}

/// Classify one line against the registered names, in registration order.
///
/// Returns one `ToolInvocation` per matching tool, or a single `Unmatched`.
pub fn classify_line(line: &str, tool_names: &[&str]) -> Vec<PlanStep> {
    let steps: Vec<PlanStep> = tool_names
        .iter()
        .filter(|name| find_ignore_case(line, name).is_some())
        .map(|name| PlanStep::ToolInvocation {
            tool: (*name).to_string(),
            argument: extract_argument(line, name),
        })
        .collect();

    if steps.is_empty() {
        vec![PlanStep::Unmatched(line.to_string())]
    } else {
        steps
    }
}

/// Derive the tool argument from a line that mentions `tool_name`.
pub fn extract_argument(line: &str, tool_name: &str) -> String {
    let without_name = match find_ignore_case(line, tool_name) {
        Some(range) => format!("{}{}", &line[..range.start], &line[range.end..]),
        None => line.to_string(),
    };
    without_name
        .trim_matches(is_argument_separator)
        .to_string()
}

fn is_argument_separator(c: char) -> bool {
    c.is_whitespace() || c == ':' || c == '-'
}

/// Byte range of the first case-insensitive occurrence of `needle`.
///
/// Compares char by char so the range always lands on char boundaries of
/// `haystack`, even when lowercasing would change byte lengths.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return Some(0..0);
    }

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut wanted = needle.chars();
        loop {
            match (wanted.next(), rest.next()) {
                (None, Some((offset, _))) => return Some(start..start + offset),
                (None, None) => return Some(start..haystack.len()),
                (Some(n), Some((_, h))) if chars_eq_ignore_case(n, h) => {}
                _ => break,
            }
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
