// Utility helpers for text normalization and console formatting.
//
// This module centralizes the "dirty" string handling so the normalizers can
// work on predictable, pre-cleaned text.
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Render a JSON scalar as text for fuzzy matching.
///
/// Nulls, arrays and objects yield `None`; absence and unusable values are
/// treated identically downstream.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lowercase and collapse every non-alphanumeric run into a single space.
///
/// `"Pegawai Negeri-Sipil  (aktif)"` becomes `"pegawai negeri sipil aktif"`,
/// which makes word-boundary and substring checks insensitive to punctuation.
pub fn squash_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push(' ');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    out
}

/// Lowercase and drop everything that is not alphanumeric. Used for level
/// detection where "D-III" and "D3" must compare equal-ish.
pub fn compact_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Whole-word containment over squashed text.
pub fn contains_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|t| t == word)
}

/// Thousands-separated integer for console messages (e.g. `1,234 rows`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_text_covers_scalars_only() {
        assert_eq!(value_text(&json!("PNS")), Some("PNS".to_string()));
        assert_eq!(value_text(&json!(45)), Some("45".to_string()));
        assert_eq!(value_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!(["a"])), None);
        assert_eq!(value_text(&json!({"a": 1})), None);
    }

    #[test]
    fn squash_collapses_punctuation_runs() {
        assert_eq!(squash_text("Pegawai Negeri-Sipil  (aktif)"), "pegawai negeri sipil aktif");
        assert_eq!(squash_text("--"), "");
        assert_eq!(squash_text("  PNS  "), "pns");
    }

    #[test]
    fn compact_strips_everything_but_alnum() {
        assert_eq!(compact_text("D-III"), "diii");
        assert_eq!(compact_text("S.1 (Sarjana)"), "s1sarjana");
    }

    #[test]
    fn contains_word_requires_boundaries() {
        assert!(contains_word("calon pns daerah", "pns"));
        assert!(!contains_word("cpns daerah", "pns"));
    }
}
