//! Value token handling at the spreadsheet/annotation boundary.
//!
//! Values are kept as ordered lists of raw strings. Two stored forms are
//! accepted when reading from the object store: a plain string is one value,
//! while a string of single-quoted tokens (`'a', ' ', 'b'`) holds several values
//! and is expanded. The quoted form is produced again only when values are
//! uploaded.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder stored for an empty value in the quoted form
pub const EMPTY_TOKEN: &str = "' '";

static QUOTED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*'[^']*'(?:\s*,\s*'[^']*')*\s*$").expect("valid regex pattern")
});

static QUOTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("valid regex pattern"));

/// True if the string consists only of comma-separated single-quoted tokens
pub fn is_quoted_list(value: &str) -> bool {
    QUOTED_LIST.is_match(value)
}

/// Extract the single-quoted tokens of a stored value.
///
/// Whitespace-only tokens are the empty placeholder and come back as `""`.
pub fn split_quoted(value: &str) -> Vec<String> {
    QUOTED_TOKEN
        .captures_iter(value)
        .map(|caps| {
            let token = caps.get(1).map_or("", |m| m.as_str());
            if token.trim().is_empty() {
                String::new()
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Drop the trailing run of empty values, keeping leading and interior ones
pub fn trim_trailing_empty(values: &mut Vec<String>) {
    while values.last().is_some_and(|v| v.is_empty()) {
        values.pop();
    }
}

/// Spreadsheet cells for a stored value list.
///
/// Quoted-list values are expanded into their tokens, plain values map to one
/// cell each. Trailing empty cells are removed.
pub fn value_tokens(values: &[String]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(values.len());
    for value in values {
        if is_quoted_list(value) {
            tokens.extend(split_quoted(value));
        } else {
            tokens.push(value.clone());
        }
    }
    trim_trailing_empty(&mut tokens);
    tokens
}

/// Quoted upload form of a value list: `'a', ' ', 'b'`.
///
/// A cell that is already a quoted list, as written by the joined layout or
/// typed by hand, is passed through as is.
pub fn quote_values(values: &[String]) -> String {
    let mut tokens: Vec<String> = values
        .iter()
        .map(|v| {
            if v.is_empty() {
                EMPTY_TOKEN.to_string()
            } else if is_quoted_list(v) {
                v.trim().to_string()
            } else {
                format!("'{v}'")
            }
        })
        .collect();
    while tokens.last().is_some_and(|t| t == EMPTY_TOKEN) {
        tokens.pop();
    }
    tokens.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_quoted_list_detection() {
        assert!(is_quoted_list("'Experiment 1'"));
        assert!(is_quoted_list("'a', ' ', 'b'"));
        assert!(is_quoted_list("'a, with comma','b'"));
        assert!(!is_quoted_list("plain value"));
        assert!(!is_quoted_list("it's"));
        assert!(!is_quoted_list("'a', b"));
        assert!(!is_quoted_list(""));
    }

    #[test]
    fn test_split_quoted_keeps_interior_placeholders() {
        assert_eq!(
            split_quoted("' ', 'a', ' ', 'b'"),
            strings(&["", "a", "", "b"])
        );
        assert_eq!(split_quoted("'a, with comma'"), strings(&["a, with comma"]));
    }

    #[test]
    fn test_value_tokens_trailing_trim() {
        assert_eq!(value_tokens(&strings(&["a", "", "b"])).len(), 3);
        assert_eq!(value_tokens(&strings(&["a", "", ""])), strings(&["a"]));
        assert_eq!(value_tokens(&strings(&["'a', ' ', ' '"])), strings(&["a"]));
        assert!(value_tokens(&[]).is_empty());
    }

    #[test]
    fn test_value_tokens_mixed_forms() {
        let values = strings(&["'Experiment 1'", "plain"]);
        assert_eq!(value_tokens(&values), strings(&["Experiment 1", "plain"]));
    }

    #[test]
    fn test_quote_values() {
        assert_eq!(quote_values(&strings(&["randomized"])), "'randomized'");
        assert_eq!(quote_values(&strings(&["", "a", "", "b"])), "' ', 'a', ' ', 'b'");
        assert_eq!(quote_values(&strings(&["a", "", ""])), "'a'");
        assert_eq!(quote_values(&[]), "");
    }

    #[test]
    fn test_quote_values_keeps_quoted_cells() {
        assert_eq!(quote_values(&strings(&["'randomized'"])), "'randomized'");
        assert_eq!(
            quote_values(&strings(&["'a', ' ', 'b'", "c"])),
            "'a', ' ', 'b', 'c'"
        );
        assert_eq!(quote_values(&strings(&["'x'", "' '"])), "'x'");
    }

    #[test]
    fn test_quote_then_split() {
        let values = strings(&["x", "", "y, z"]);
        assert_eq!(split_quoted(&quote_values(&values)), values);
    }
}
