// Linguistic resources — stopword sets keyed by language.
//
// Built once with `LinguisticResources::load()` and passed by reference into
// every normalization call. Nothing here is mutated after construction, so a
// single value can be shared by any number of concurrent analyses.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::warn;

/// Language used when the requested one has no stopword set.
pub const FALLBACK_LANGUAGE: &str = "english";

/// Connectives removed on top of the standard stopwords. They carry no
/// topical meaning but otherwise dominate frequency tables.
pub const LINKING_WORDS: &[&str] = &[
    "and",
    "or",
    "but",
    "so",
    "because",
    "however",
    "therefore",
    "moreover",
    "thus",
    "hence",
];

/// Languages with a bundled stopword list, by their long name.
const BUNDLED_LANGUAGES: &[&str] = &[
    "english",
    "german",
    "french",
    "spanish",
    "italian",
    "portuguese",
    "dutch",
    "russian",
    "swedish",
    "norwegian",
    "danish",
    "finnish",
    "hungarian",
    "turkish",
    "polish",
    "arabic",
];

fn bundled_language(name: &str) -> Option<LANGUAGE> {
    let lang = match name {
        "english" => LANGUAGE::English,
        "german" => LANGUAGE::German,
        "french" => LANGUAGE::French,
        "spanish" => LANGUAGE::Spanish,
        "italian" => LANGUAGE::Italian,
        "portuguese" => LANGUAGE::Portuguese,
        "dutch" => LANGUAGE::Dutch,
        "russian" => LANGUAGE::Russian,
        "swedish" => LANGUAGE::Swedish,
        "norwegian" => LANGUAGE::Norwegian,
        "danish" => LANGUAGE::Danish,
        "finnish" => LANGUAGE::Finnish,
        "hungarian" => LANGUAGE::Hungarian,
        "turkish" => LANGUAGE::Turkish,
        "polish" => LANGUAGE::Polish,
        "arabic" => LANGUAGE::Arabic,
        _ => return None,
    };
    Some(lang)
}

/// Stopword sets and the linking-word list used by the normalizer.
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stopwords: HashMap<String, HashSet<String>>,
    linking_words: HashSet<String>,
    empty: HashSet<String>,
}

impl LinguisticResources {
    /// Load the bundled stopword lists for every supported language.
    pub fn load() -> Self {
        Self::from_sets(BUNDLED_LANGUAGES.iter().filter_map(|name| {
            let lang = bundled_language(name)?;
            let words: Vec<String> = get(lang).iter().map(|w| w.to_string()).collect();
            Some((name.to_string(), words))
        }))
    }

    /// Build resources from explicit stopword lists (language name -> words).
    ///
    /// Useful for tests and for callers that ship their own lists.
    pub fn from_sets<I, W>(sets: I) -> Self
    where
        I: IntoIterator<Item = (String, W)>,
        W: IntoIterator<Item = String>,
    {
        let stopwords = sets
            .into_iter()
            .map(|(lang, words)| {
                let set = words.into_iter().map(|w| w.to_lowercase()).collect();
                (lang.to_lowercase(), set)
            })
            .collect();

        Self {
            stopwords,
            linking_words: LINKING_WORDS.iter().map(|w| w.to_string()).collect(),
            empty: HashSet::new(),
        }
    }

    /// Whether a stopword set exists for `language` (long name or ISO code).
    pub fn supports(&self, language: &str) -> bool {
        self.stopwords.contains_key(canonical_language(language).as_str())
    }

    /// Stopwords for `language`, falling back to English when the language
    /// is unknown. The fallback is logged, never raised.
    pub fn stopwords(&self, language: &str) -> &HashSet<String> {
        let canonical = canonical_language(language);
        if let Some(set) = self.stopwords.get(canonical.as_str()) {
            return set;
        }

        warn!(
            language,
            fallback = FALLBACK_LANGUAGE,
            "No stopword list for language, falling back"
        );
        self.stopwords.get(FALLBACK_LANGUAGE).unwrap_or(&self.empty)
    }

    pub fn is_linking_word(&self, token: &str) -> bool {
        self.linking_words.contains(token)
    }

    /// Supported language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.stopwords.keys().map(|k| k.as_str()).collect();
        langs.sort_unstable();
        langs
    }
}

/// Map ISO 639-1 codes onto the long names used as keys.
fn canonical_language(language: &str) -> String {
    let lower = language.trim().to_lowercase();
    let long = match lower.as_str() {
        "en" => "english",
        "de" => "german",
        "fr" => "french",
        "es" => "spanish",
        "it" => "italian",
        "pt" => "portuguese",
        "nl" => "dutch",
        "ru" => "russian",
        "sv" => "swedish",
        "no" | "nb" => "norwegian",
        "da" => "danish",
        "fi" => "finnish",
        "hu" => "hungarian",
        "tr" => "turkish",
        "pl" => "polish",
        "ar" => "arabic",
        _ => return lower,
    };
    long.to_string()
}
