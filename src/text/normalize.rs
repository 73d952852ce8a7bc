// Normalization — raw document text to countable tokens.
//
// Steps, in order: lowercase, collapse every run of non-word characters to a
// single space, split on whitespace, keep purely alphanumeric tokens, drop
// stopwords and linking words. Order is preserved and nothing is deduplicated.

use std::collections::HashSet;

use super::resources::LinguisticResources;

/// A normalizer bound to one language's stopword set.
///
/// Resolving the stopword set once (and logging a language fallback once)
/// matters when the same language is applied to many documents in a row.
pub struct Normalizer<'a> {
    resources: &'a LinguisticResources,
    stopwords: &'a HashSet<String>,
}

impl<'a> Normalizer<'a> {
    pub fn new(resources: &'a LinguisticResources, language: &str) -> Self {
        Self {
            resources,
            stopwords: resources.stopwords(language),
        }
    }

    /// Turn raw text into normalized tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = collapse_non_word(&text.to_lowercase());
        cleaned
            .split_whitespace()
            .filter(|token| token.chars().all(char::is_alphanumeric))
            .filter(|token| !self.stopwords.contains(*token))
            .filter(|token| !self.resources.is_linking_word(token))
            .map(str::to_string)
            .collect()
    }
}

/// Normalize `text` with the stopwords of `language` (English if unknown).
pub fn normalize(text: &str, language: &str, resources: &LinguisticResources) -> Vec<String> {
    Normalizer::new(resources, language).normalize(text)
}

/// Join tokens back into text that normalizes to the same tokens.
pub fn normalize_to_text(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Word characters follow the usual `\w` definition: alphanumerics and `_`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace each maximal run of non-word characters with one space.
fn collapse_non_word(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.chars() {
        if is_word_char(c) {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> LinguisticResources {
        LinguisticResources::from_sets(vec![(
            "english".to_string(),
            vec!["the".to_string(), "is".to_string(), "a".to_string()],
        )])
    }

    #[test]
    fn test_collapse_non_word() {
        assert_eq!(collapse_non_word("well-known, fact!!"), "well known fact ");
        assert_eq!(collapse_non_word("--x"), " x");
    }

    #[test]
    fn test_punctuation_becomes_boundary() {
        let tokens = normalize("The cost-benefit ratio is 3.5", "english", &resources());
        assert_eq!(tokens, vec!["cost", "benefit", "ratio", "3", "5"]);
    }

    #[test]
    fn test_underscore_tokens_dropped() {
        let tokens = normalize("snake_case stays out", "english", &resources());
        assert_eq!(tokens, vec!["stays", "out"]);
    }

    #[test]
    fn test_linking_words_removed() {
        let tokens = normalize(
            "Budget rose; however, revenue fell and thus margins shrank",
            "english",
            &resources(),
        );
        assert_eq!(tokens, vec!["budget", "rose", "revenue", "fell", "margins", "shrank"]);
    }

    #[test]
    fn test_order_and_duplicates_kept() {
        let tokens = normalize("Zebra apple zebra", "english", &resources());
        assert_eq!(tokens, vec!["zebra", "apple", "zebra"]);
    }

    #[test]
    fn test_unicode_letters_survive() {
        let tokens = normalize("Café déjà-vu", "english", &resources());
        assert_eq!(tokens, vec!["café", "déjà", "vu"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(normalize("", "english", &resources()).is_empty());
        assert!(normalize("... !!! ---", "english", &resources()).is_empty());
    }
}
