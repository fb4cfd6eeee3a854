//! Compact output rendering helpers for CLI surfaces.
//!
//! Keeps list rows bounded and readable while preserving signal.

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Render up to `max_items` tags, comma-joined, with an overflow count.
pub fn preview_tags(tags: &[String], max_items: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let shown = tags
        .iter()
        .take(max_items)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > max_items {
        format!("{} (+{} more)", shown, tags.len() - max_items)
    } else {
        shown
    }
}
