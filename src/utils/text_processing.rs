//! Text processing utilities.
//!
//! Helpers shared by the admin forms and the page editor: route path
//! normalisation, comma-separated list parsing, and label formatting.

use log::*;
use regex::Regex;

/// Allowed shape of a route path after normalisation.
///
const PATH_PATTERN: &str = r"^/[a-z0-9][a-z0-9\-_/]*$|^/$";

/// Normalise user input into a route path: trimmed, lowercased, with a
/// single leading slash and no trailing slash. Returns `None` when the
/// result is not a valid path.
///
/// # Examples
/// `"Blog"` becomes `"/blog"`, `"/my-work/"` becomes `"/my-work"`.
pub fn normalize_path(input: &str) -> Option<String> {
    let trimmed = input.trim().to_lowercase();
    let body = trimmed.trim_matches('/');
    let path = format!("/{}", body);

    let re = match Regex::new(PATH_PATTERN) {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to compile path pattern '{}': {}", PATH_PATTERN, e);
            return None;
        }
    };
    if re.is_match(&path) {
        Some(path)
    } else {
        None
    }
}

/// Split a comma-separated list, trimming entries and dropping empty and
/// repeated ones while keeping the first occurrence order.
///
pub fn parse_list(input: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in input.split(',') {
        let item = item.trim();
        if !item.is_empty() && !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

/// Join list items back into the editable comma-separated form.
///
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Uppercase the first character.
///
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Treat blank strings as absent.
///
pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Blog"), Some("/blog".to_string()));
        assert_eq!(normalize_path(" /my-work/ "), Some("/my-work".to_string()));
        assert_eq!(normalize_path("/notes/2024"), Some("/notes/2024".to_string()));
        assert_eq!(normalize_path("/"), Some("/".to_string()));
        assert_eq!(normalize_path("/a b"), None);
        assert_eq!(normalize_path("/-dash"), None);
    }

    #[test]
    fn test_parse_list_trims_and_dedupes() {
        assert_eq!(
            parse_list(" Rust, SQL ,,Rust, Go "),
            vec!["Rust".to_string(), "SQL".to_string(), "Go".to_string()]
        );
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn test_join_list() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_list(&items), "a, b");
        assert_eq!(parse_list(&join_list(&items)), items);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("github"), "Github");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
