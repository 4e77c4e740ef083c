//! Text normalization for entity name matching

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize an entity name for matching.
///
/// Performs:
/// - Unicode NFD decomposition with combining marks dropped (strips
///   diacritics, so "Pútin" and "Putin" compare equal)
/// - Lowercase conversion
/// - Whitespace runs collapsed to a single space
/// - Leading/trailing whitespace stripped
pub fn normalize_name(s: &str) -> String {
    let decomposed: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();

    decomposed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize_name("  Vladimir Putin "), "vladimir putin");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize_name("Vladimir \t  Putin"), "vladimir putin");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(normalize_name("Vladímir Pútin"), "vladimir putin");
        assert_eq!(normalize_name("Société Générale"), "societe generale");
    }

    #[test]
    fn test_already_normal_is_unchanged() {
        assert_eq!(normalize_name("acme shipping"), "acme shipping");
    }
}
