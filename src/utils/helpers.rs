//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use rand::seq::SliceRandom;
use regex::{Captures, Regex};

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitute `{key}` placeholders in a template.
///
/// Values are inserted verbatim in a single pass, so placeholders inside a
/// value are never expanded. Callers escape values first when the template
/// is sent as HTML. Unknown placeholders are left untouched.
pub fn render_template(template: &str, params: &[(&str, &str)]) -> String {
    let placeholder = match Regex::new(r"\{(\w+)\}") {
        Ok(placeholder) => placeholder,
        Err(_) => return template.to_string(),
    };

    placeholder
        .replace_all(template, |caps: &Captures| {
            params
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Pick a random entry, if any
pub fn choose_random(items: &[String]) -> Option<&str> {
    items.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
        assert_eq!(truncate_text("привет мир", 7), "прив...");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("DApps & Enterprise"), "DApps &amp; Enterprise");
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(escape_html("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_render_template() {
        let rendered = render_template(
            "Hi {name}, you picked {category}. {unknown}",
            &[("name", "Ada"), ("category", "Research")],
        );
        assert_eq!(rendered, "Hi Ada, you picked Research. {unknown}");
    }

    #[test]
    fn test_render_template_does_not_expand_values() {
        let rendered = render_template(
            "{summary}\n{contacts}",
            &[("summary", "met at {contacts}"), ("contacts", "Antonio")],
        );
        assert_eq!(rendered, "met at {contacts}\nAntonio");
    }

    #[test]
    fn test_choose_random() {
        let empty: Vec<String> = vec![];
        assert_eq!(choose_random(&empty), None);

        let facts = vec!["one".to_string(), "two".to_string()];
        let picked = choose_random(&facts).unwrap();
        assert!(picked == "one" || picked == "two");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  core   engineering "), "core engineering");
    }
}
