//! Tag taxonomy and keyword-based tag suggestion.
//!
//! The taxonomy is an ordered list of rules, each mapping a display tag to
//! the lowercase keywords that trigger it. It is built once at startup
//! (either the built-in course taxonomy or a JSON file) and shared
//! immutably; suggestion itself is pure string matching.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Upper bound on suggestions returned for a single text.
pub const MAX_SUGGESTIONS: usize = 5;

/// Built-in taxonomy, in priority order. Earlier rules win the cap.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "User research",
        &[
            "research",
            "user research",
            "usability",
            "testing",
            "interview",
            "survey",
            "ethnograph",
            "contextual inquiry",
            "persona",
            "journey map",
        ],
    ),
    (
        "Prototyping",
        &[
            "prototype",
            "prototyping",
            "wireframe",
            "mockup",
            "lo-fi",
            "hi-fi",
            "interactive",
        ],
    ),
    (
        "Vibe Coding",
        &[
            "vibe coding",
            "vibe",
            "cursor",
            "copilot",
            "code generation",
            "ai coding",
            "v0",
        ],
    ),
    (
        "Examples",
        &["example", "case study", "showcase", "demo", "sample", "portfolio"],
    ),
    (
        "Ethics",
        &[
            "ethics",
            "ethical",
            "bias",
            "privacy",
            "consent",
            "trust",
            "responsible",
            "fairness",
            "harm",
        ],
    ),
    (
        "UXD and AI",
        &[
            "ux",
            "user experience",
            "ai design",
            "ai ux",
            "human-ai",
            "intelligent interface",
        ],
    ),
    (
        "Productivity Tools",
        &["tool", "productivity", "workflow", "automation", "efficiency", "app"],
    ),
    ("Claude", &["claude", "anthropic"]),
    ("ChatGPT", &["chatgpt", "gpt", "openai", "gpt-4", "gpt-5"]),
    ("Gemini", &["gemini", "google ai", "bard"]),
    (
        "Midjourney",
        &["midjourney", "image generation", "ai art", "text to image"],
    ),
    ("Figma", &["figma", "design tool", "ui design"]),
    (
        "Study",
        &["study", "academic", "paper", "research paper", "journal", "publication"],
    ),
    (
        "Tutorial",
        &["tutorial", "guide", "how to", "learn", "course", "lesson", "walkthrough"],
    ),
    (
        "Qualitative",
        &[
            "qualitative",
            "interview",
            "focus group",
            "observation",
            "ethnography",
            "thematic",
            "grounded theory",
        ],
    ),
    (
        "Quantitative/Automated",
        &[
            "quantitative",
            "automated",
            "analytics",
            "metrics",
            "statistics",
            "data analysis",
            "a/b test",
            "survey data",
            "measurement",
        ],
    ),
    (
        "Methodology",
        &[
            "methodology",
            "method",
            "framework",
            "approach",
            "process",
            "technique",
            "strategy",
            "systematic",
        ],
    ),
];

#[derive(Debug, Clone, Deserialize)]
pub struct TagRule {
    pub tag: String,
    pub keywords: Vec<String>,
}

/// Immutable, ordered tag taxonomy.
#[derive(Debug, Clone)]
pub struct TagTaxonomy {
    rules: Vec<TagRule>,
}

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse taxonomy file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid taxonomy: {0}")]
    Invalid(String),
}

impl TagTaxonomy {
    /// The built-in course taxonomy.
    pub fn builtin() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(tag, keywords)| TagRule {
                tag: (*tag).to_string(),
                keywords: keywords.iter().map(|kw| (*kw).to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Load a taxonomy from a JSON file: an array of `{tag, keywords}`
    /// objects in priority order. Keywords are lowercased on load since
    /// matching is case-insensitive.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let rules: Vec<TagRule> = serde_json::from_str(&raw)?;
        let taxonomy = Self::from_rules(rules)?;
        info!(
            path = %path.as_ref().display(),
            tags = taxonomy.len(),
            "loaded tag taxonomy"
        );
        Ok(taxonomy)
    }

    pub fn from_rules(rules: Vec<TagRule>) -> Result<Self, TaxonomyError> {
        if rules.is_empty() {
            return Err(TaxonomyError::Invalid("taxonomy has no rules".to_string()));
        }
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            let tag = rule.tag.trim().to_string();
            if tag.is_empty() {
                return Err(TaxonomyError::Invalid("rule with empty tag".to_string()));
            }
            let keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(TaxonomyError::Invalid(format!(
                    "rule '{}' has no keywords",
                    tag
                )));
            }
            normalized.push(TagRule { tag, keywords });
        }
        Ok(Self { rules: normalized })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Suggest up to [`MAX_SUGGESTIONS`] tags for a free-text blob.
    ///
    /// Rules are tried in declaration order; a rule fires on the first of
    /// its keywords found as a substring of the lowercased input. No
    /// scoring, no stemming, no duplicates.
    pub fn suggest(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let haystack = text.to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();
        for rule in &self.rules {
            if suggestions.len() >= MAX_SUGGESTIONS {
                break;
            }
            if suggestions.iter().any(|t| t == &rule.tag) {
                continue;
            }
            if rule
                .keywords
                .iter()
                .any(|kw| haystack.contains(kw.as_str()))
            {
                suggestions.push(rule.tag.clone());
            }
        }
        suggestions
    }
}

/// Normalize a user-entered tag: trim, keep all-caps acronyms as typed,
/// title-case everything else word by word.
pub fn format_tag(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() > 1 && trimmed == trimmed.to_uppercase() {
        return trimmed.to_string();
    }
    trimmed
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_in_declaration_order() {
        let taxonomy = TagTaxonomy::builtin();
        let suggestions = taxonomy.suggest("A figma tutorial about usability testing");
        // "User research" (usability) precedes "Tutorial" and "Figma" in the table
        assert_eq!(suggestions[0], "User research");
        assert!(suggestions.contains(&"Figma".to_string()));
        assert!(suggestions.contains(&"Tutorial".to_string()));
    }

    #[test]
    fn suggestions_capped_at_five_without_duplicates() {
        let taxonomy = TagTaxonomy::builtin();
        let text = "research prototype vibe example ethics ux tool claude gpt gemini";
        let suggestions = taxonomy.suggest(text);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        let mut deduped = suggestions.clone();
        deduped.dedup();
        assert_eq!(deduped, suggestions);
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        let taxonomy = TagTaxonomy::builtin();
        assert!(taxonomy.suggest("").is_empty());
        assert!(taxonomy.suggest("   \t\n").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let taxonomy = TagTaxonomy::builtin();
        let suggestions = taxonomy.suggest("MIDJOURNEY and ChatGPT");
        assert!(suggestions.contains(&"Midjourney".to_string()));
        assert!(suggestions.contains(&"ChatGPT".to_string()));
    }

    #[test]
    fn substring_matching_has_no_word_boundaries() {
        let taxonomy = TagTaxonomy::builtin();
        // "app" inside "happy" still fires Productivity Tools
        let suggestions = taxonomy.suggest("happy little clouds");
        assert!(suggestions.contains(&"Productivity Tools".to_string()));
    }

    #[test]
    fn from_rules_rejects_empty_taxonomy() {
        assert!(TagTaxonomy::from_rules(Vec::new()).is_err());
    }

    #[test]
    fn from_rules_rejects_keywordless_rule() {
        let rules = vec![TagRule {
            tag: "Orphan".to_string(),
            keywords: vec!["  ".to_string()],
        }];
        assert!(TagTaxonomy::from_rules(rules).is_err());
    }

    #[test]
    fn from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("alcove-taxonomy-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"tag": "Rust", "keywords": ["RUST", "cargo"]}]"#,
        )
        .unwrap();
        let taxonomy = TagTaxonomy::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.suggest("learning rust"), vec!["Rust".to_string()]);
    }

    #[test]
    fn format_tag_preserves_acronyms() {
        assert_eq!(format_tag("AI"), "AI");
        assert_eq!(format_tag(" UXD "), "UXD");
    }

    #[test]
    fn format_tag_title_cases_words() {
        assert_eq!(format_tag("machine learning"), "Machine Learning");
        assert_eq!(format_tag("fIGMA"), "Figma");
        assert_eq!(format_tag("a"), "A");
    }
}
