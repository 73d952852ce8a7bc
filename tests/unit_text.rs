// Unit tests for text normalization, linguistic resources and sentence
// splitting.
//
// Most tests use small explicit stopword lists so expectations do not
// depend on the bundled lists; a few check the bundled lists load.

use docscope::text::normalize::{normalize, normalize_to_text, Normalizer};
use docscope::text::resources::{LinguisticResources, LINKING_WORDS};
use docscope::text::sentences::split_sentences;

fn small_resources() -> LinguisticResources {
    LinguisticResources::from_sets(vec![
        (
            "english".to_string(),
            vec!["the".to_string(), "of".to_string(), "is".to_string()],
        ),
        (
            "german".to_string(),
            vec!["der".to_string(), "und".to_string()],
        ),
    ])
}

// ============================================================
// Normalizer — token rules
// ============================================================

#[test]
fn lowercases_and_removes_stopwords() {
    let tokens = normalize("The Price OF Gold", "english", &small_resources());
    assert_eq!(tokens, vec!["price", "gold"]);
}

#[test]
fn uses_requested_language() {
    let resources = small_resources();
    let tokens = normalize("der Hund und the cat", "german", &resources);
    assert_eq!(tokens, vec!["hund", "the", "cat"]);
}

#[test]
fn unknown_language_falls_back_to_english() {
    let tokens = normalize("the klingon of words", "klingon", &small_resources());
    assert_eq!(tokens, vec!["klingon", "words"]);
}

#[test]
fn linking_words_removed_in_every_language() {
    let resources = small_resources();
    for word in LINKING_WORDS {
        let text = format!("alpha {word} beta");
        assert_eq!(normalize(&text, "german", &resources), vec!["alpha", "beta"]);
    }
}

#[test]
fn digits_are_tokens() {
    let tokens = normalize("Revenue 2021: 450 units", "english", &small_resources());
    assert_eq!(tokens, vec!["revenue", "2021", "450", "units"]);
}

#[test]
fn normalizer_reusable_across_texts() {
    let resources = small_resources();
    let normalizer = Normalizer::new(&resources, "english");
    assert_eq!(normalizer.normalize("The turbine"), vec!["turbine"]);
    assert_eq!(normalizer.normalize("is spinning"), vec!["spinning"]);
}

#[test]
fn joined_tokens_renormalize_to_same_tokens() {
    let resources = small_resources();
    let tokens = normalize(
        "The state-of-the-art reactor; however, it's (mostly) idle!",
        "english",
        &resources,
    );
    let again = normalize(&normalize_to_text(&tokens), "english", &resources);
    assert_eq!(tokens, again);
}

// ============================================================
// LinguisticResources — bundled lists
// ============================================================

#[test]
fn bundled_english_list_loads() {
    let resources = LinguisticResources::load();
    assert!(resources.supports("english"));
    assert!(resources.supports("en"));
    assert!(resources.stopwords("english").contains("the"));
}

#[test]
fn bundled_languages_listed() {
    let resources = LinguisticResources::load();
    let languages = resources.languages();
    assert!(languages.contains(&"english"));
    assert!(languages.contains(&"german"));
}

#[test]
fn bundled_normalization_keeps_content_words() {
    let resources = LinguisticResources::load();
    let tokens = normalize("The reactor and the glacier", "english", &resources);
    assert_eq!(tokens, vec!["reactor", "glacier"]);
}

// ============================================================
// Sentence splitting
// ============================================================

#[test]
fn splits_on_terminal_punctuation() {
    let sentences = split_sentences("Costs rose. Did margins fall? Yes!");
    assert_eq!(sentences, vec!["Costs rose.", "Did margins fall?", "Yes!"]);
}

#[test]
fn keeps_decimal_numbers_together() {
    let sentences = split_sentences("Growth was 3.5 percent. Next year looks flat.");
    assert_eq!(
        sentences,
        vec!["Growth was 3.5 percent.", "Next year looks flat."]
    );
}

#[test]
fn trailing_fragment_is_a_sentence() {
    let sentences = split_sentences("First sentence. then a fragment");
    assert_eq!(sentences, vec!["First sentence.", "then a fragment"]);
}

#[test]
fn empty_text_has_no_sentences() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n ").is_empty());
}
