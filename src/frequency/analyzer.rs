// Word-frequency analyses over a document collection.
//
// Corpus-wide counts normalize the concatenated text once. Temporal counts
// associate a whole document with every date it mentions: a report citing
// 2019, 2020 and 2021 adds its full word distribution to all three buckets,
// once per date occurrence. This is document-level association, not a
// window of words around each date.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::dates::extract::extract_parsed_dates;
use crate::dates::period::{DateBucketKey, Period};
use crate::document::Document;
use crate::error::{AnalysisError, AnalysisResult};
use crate::text::normalize::Normalizer;
use crate::text::resources::LinguisticResources;

use super::table::FrequencyTable;

/// Ranked `(token, count)` pairs, highest count first.
pub type WordCounts = Vec<(String, usize)>;

/// Top words across the whole collection, plus the full table.
pub fn top_words(
    documents: &[Document],
    top_n: usize,
    language: &str,
    resources: &LinguisticResources,
) -> AnalysisResult<(WordCounts, FrequencyTable)> {
    if documents.is_empty() {
        return Err(AnalysisError::EmptyInput(
            "no documents to count words in".to_string(),
        ));
    }

    let all_text = documents
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let tokens = Normalizer::new(resources, language).normalize(&all_text);
    if tokens.is_empty() {
        return Err(AnalysisError::EmptyInput(format!(
            "{} documents contain no countable words",
            documents.len()
        )));
    }

    let table = FrequencyTable::from_tokens(&tokens);
    info!(
        documents = documents.len(),
        tokens = table.total(),
        vocabulary = table.len(),
        "Counted corpus words"
    );

    Ok((table.most_common(top_n), table))
}

/// Top words of a single document.
pub fn document_top_words(
    document: &Document,
    top_n: usize,
    language: &str,
    resources: &LinguisticResources,
) -> AnalysisResult<WordCounts> {
    let (top, _) = top_words(std::slice::from_ref(document), top_n, language, resources)?;
    Ok(top)
}

/// Top words per date bucket at the given period granularity.
///
/// Documents without a parseable date contribute to no bucket. The result
/// is empty (not an error) when no document carries a parseable date.
pub fn top_words_by_period(
    documents: &[Document],
    top_n: usize,
    language: &str,
    period: Period,
    resources: &LinguisticResources,
) -> AnalysisResult<BTreeMap<DateBucketKey, WordCounts>> {
    if documents.is_empty() {
        return Err(AnalysisError::EmptyInput(
            "no documents to bucket by date".to_string(),
        ));
    }

    let normalizer = Normalizer::new(resources, language);
    let mut buckets: BTreeMap<DateBucketKey, FrequencyTable> = BTreeMap::new();
    let mut any_tokens = false;

    for doc in documents {
        let dates = extract_parsed_dates(&doc.text);
        let counts = FrequencyTable::from_tokens(normalizer.normalize(&doc.text));
        any_tokens |= !counts.is_empty();

        debug!(
            document = doc.identifier,
            dates = dates.len(),
            tokens = counts.total(),
            "Bucketing document"
        );

        for date in dates {
            buckets.entry(period.bucket(date)).or_default().merge(&counts);
        }
    }

    if !any_tokens {
        return Err(AnalysisError::EmptyInput(format!(
            "{} documents contain no countable words",
            documents.len()
        )));
    }

    info!(
        period = %period,
        buckets = buckets.len(),
        "Counted words by period"
    );

    Ok(buckets
        .into_iter()
        .map(|(key, table)| (key, table.most_common(top_n)))
        .collect())
}
