//! Typed entity extraction with source-text spans

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entity category recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Technology,
    Topic,
    Number,
    Email,
    Url,
    Date,
    Time,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Technology => "TECHNOLOGY",
            EntityKind::Topic => "TOPIC",
            EntityKind::Number => "NUMBER",
            EntityKind::Email => "EMAIL",
            EntityKind::Url => "URL",
            EntityKind::Date => "DATE",
            EntityKind::Time => "TIME",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed span of recognized information inside the input text
///
/// `start`/`end` are byte offsets into the ORIGINAL (non-normalized) input,
/// so spans always point at source text. `value` is the matched substring
/// with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Regex-based entity extractor
///
/// Each kind is matched independently against the original input; a single
/// message may yield several entities of the same kind and of different
/// kinds, with no deduplication between kinds. Output order is extractor
/// declaration order, then textual order within a kind.
pub struct EntityExtractor {
    patterns: Vec<(EntityKind, Regex)>,
}

impl EntityExtractor {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            (
                EntityKind::Technology,
                Regex::new(
                    r"(?i)\b(java|python|javascript|html|css|sql|database|programming|coding|software|ai|machine learning|nlp)\b",
                )?,
            ),
            (
                EntityKind::Topic,
                Regex::new(
                    r"(?i)\b(weather|time|date|news|sports|music|movies|books|science|history|geography)\b",
                )?,
            ),
            (EntityKind::Number, Regex::new(r"\b\d+\b")?),
            (
                EntityKind::Email,
                Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            ),
            (
                EntityKind::Url,
                Regex::new(
                    r"https?://[\w\-]+(\.[\w\-]+)+([\w\-.,@?^=%&:/~+#]*[\w\-@?^=%&/~+#])?",
                )?,
            ),
            (
                EntityKind::Date,
                Regex::new(r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b(today|tomorrow|yesterday)\b")?,
            ),
            (
                EntityKind::Time,
                Regex::new(r"(?i)\b\d{1,2}:\d{2}\s?(AM|PM|am|pm)?\b|\b(morning|afternoon|evening|night)\b")?,
            ),
        ];

        Ok(Self { patterns })
    }

    /// Extract every entity from the original input text
    ///
    /// Zero matches is an ordinary empty result, never an error. Extraction
    /// has no state, so running it twice yields identical lists.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for (kind, pattern) in &self.patterns {
            for m in pattern.find_iter(text) {
                entities.push(Entity {
                    kind: *kind,
                    value: m.as_str().trim().to_string(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new().unwrap()
    }

    #[test]
    fn test_technology_case_insensitive() {
        let entities = extractor().extract("What is Java?");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Technology);
        assert_eq!(entities[0].value, "Java");
        assert_eq!(entities[0].start, 8);
        assert_eq!(entities[0].end, 12);
    }

    #[test]
    fn test_multiple_kinds_no_dedup() {
        let entities = extractor().extract("python tutorial at 10:30 with 42 examples");
        let kinds: Vec<EntityKind> = entities.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&EntityKind::Technology));
        assert!(kinds.contains(&EntityKind::Number));
        assert!(kinds.contains(&EntityKind::Time));
    }

    #[test]
    fn test_multiple_entities_same_kind() {
        let entities = extractor().extract("java or python");
        let techs: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Technology)
            .collect();
        assert_eq!(techs.len(), 2);
        assert_eq!(techs[0].value, "java");
        assert_eq!(techs[1].value, "python");
    }

    #[test]
    fn test_email_and_url() {
        let entities = extractor().extract("mail me at dev@example.com or see https://example.com/docs");
        assert!(entities.iter().any(|e| e.kind == EntityKind::Email && e.value == "dev@example.com"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Url && e.value == "https://example.com/docs"));
    }

    #[test]
    fn test_date_forms() {
        let entities = extractor().extract("meet on 12/31/2025 or tomorrow");
        let dates: Vec<&Entity> = entities.iter().filter(|e| e.kind == EntityKind::Date).collect();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].value, "12/31/2025");
        assert_eq!(dates[1].value, "tomorrow");
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(extractor().extract("xyzzy").is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let ex = extractor();
        let text = "email bob@test.org about python on 1/2/23 in the morning";
        assert_eq!(ex.extract(text), ex.extract(text));
    }

    #[test]
    fn test_offsets_refer_to_original_text() {
        let text = "  NUMBER 7 here";
        let entities = extractor().extract(text);
        let number = entities.iter().find(|e| e.kind == EntityKind::Number).unwrap();
        assert_eq!(&text[number.start..number.end], "7");
    }
}
