//! Text helpers for name matching and ordering

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Collation key for names: canonical decomposition with combining marks
/// removed, then lowercased. `"Álvaro"` and `"alvaro"` share a key.
pub fn name_sort_key(name: &str) -> String {
    name.trim().nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
