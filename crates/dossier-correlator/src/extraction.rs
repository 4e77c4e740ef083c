//! Topic and content extraction from flat records
//!
//! Each record is reduced to a `(topic, content)` pair through fixed
//! field-name search orders. The news-feed source is the exception: its
//! records get a unique per-article topic so articles are never merged
//! across sources.

use dossier_domain::FlatRecord;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Field names searched, in order, for a record's topic
pub const TOPIC_FIELDS: [&str; 5] = ["topic", "category", "type", "event_type", "indicator"];

/// Field names searched, in order, for a record's display content
pub const CONTENT_FIELDS: [&str; 7] = [
    "title",
    "name",
    "description",
    "summary",
    "content",
    "value",
    "text",
];

/// Number of fallback field values joined when no content field is present
const FALLBACK_FIELD_COUNT: usize = 3;

/// Extract a record's topic
///
/// The first present, non-empty field in [`TOPIC_FIELDS`] wins; a record
/// with none of them falls back to the source's own name, so every record
/// from such a source groups under one topic.
pub fn extract_topic(record: &FlatRecord, source_name: &str) -> String {
    TOPIC_FIELDS
        .iter()
        .find_map(|field| record.display_field(field))
        .unwrap_or_else(|| source_name.to_string())
}

/// Extract a record's display content
///
/// The first present, non-empty field in [`CONTENT_FIELDS`] wins, else the
/// first three non-null field values joined with `" | "`.
pub fn extract_content(record: &FlatRecord) -> String {
    if let Some(content) = CONTENT_FIELDS
        .iter()
        .find_map(|field| record.display_field(field))
    {
        return content;
    }

    record
        .iter()
        .filter(|(_, value)| !value.is_null())
        .take(FALLBACK_FIELD_COUNT)
        .map(|(_, value)| value.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Build the unique per-article topic for a news-feed record
///
/// Hashes the record's URL, or its extracted content when no URL is present,
/// so two articles can never share a topic group.
pub fn article_topic(record: &FlatRecord) -> String {
    let key = record
        .display_field("url")
        .unwrap_or_else(|| extract_content(record));

    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    format!("article-{:016x}", hasher.finish())
}

/// Normalize a topic into its grouping key (case-folded, trimmed)
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::Scalar;

    fn record(fields: &[(&str, Scalar)]) -> FlatRecord {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_topic_field_priority() {
        let r = record(&[
            ("category", Scalar::Str("shipping".to_string())),
            ("topic", Scalar::Str("sanctions".to_string())),
        ]);

        // "topic" outranks "category" regardless of key order
        assert_eq!(extract_topic(&r, "registry"), "sanctions");
    }

    #[test]
    fn test_topic_skips_empty_fields() {
        let r = record(&[
            ("topic", Scalar::Str("  ".to_string())),
            ("category", Scalar::Str("shipping".to_string())),
        ]);

        assert_eq!(extract_topic(&r, "registry"), "shipping");
    }

    #[test]
    fn test_topic_falls_back_to_source_name() {
        let r = record(&[("unrelated", Scalar::Num(7.0))]);
        assert_eq!(extract_topic(&r, "vessel-registry"), "vessel-registry");
    }

    #[test]
    fn test_content_field_priority() {
        let r = record(&[
            ("description", Scalar::Str("a cargo vessel".to_string())),
            ("title", Scalar::Str("MV Aurora".to_string())),
        ]);

        assert_eq!(extract_content(&r), "MV Aurora");
    }

    #[test]
    fn test_content_fallback_joins_first_three() {
        let r = record(&[
            ("alpha", Scalar::Str("one".to_string())),
            ("beta", Scalar::Null),
            ("gamma", Scalar::Num(2.0)),
            ("delta", Scalar::Bool(true)),
            ("epsilon", Scalar::Str("never reached".to_string())),
        ]);

        assert_eq!(extract_content(&r), "one | 2 | true");
    }

    #[test]
    fn test_article_topic_unique_per_url() {
        let a = record(&[
            ("title", Scalar::Str("Same headline".to_string())),
            ("url", Scalar::Str("https://news.example/1".to_string())),
        ]);
        let b = record(&[
            ("title", Scalar::Str("Same headline".to_string())),
            ("url", Scalar::Str("https://news.example/2".to_string())),
        ]);

        assert_ne!(article_topic(&a), article_topic(&b));
        assert_eq!(article_topic(&a), article_topic(&a));
    }

    #[test]
    fn test_article_topic_without_url_uses_content() {
        let a = record(&[("title", Scalar::Str("Headline A".to_string()))]);
        let b = record(&[("title", Scalar::Str("Headline B".to_string()))]);

        assert_ne!(article_topic(&a), article_topic(&b));
    }

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("  Sanctions "), "sanctions");
        assert_eq!(normalize_topic("SANCTIONS"), "sanctions");
    }
}
