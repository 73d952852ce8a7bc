// Colored terminal output for word counts, timelines, topics and clusters.
//
// This module handles all terminal-specific formatting: colors, bars and
// section headers. The main.rs command handlers delegate here.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::clustering::documents::ClusterAssignments;
use crate::dates::period::{DateBucketKey, Period};
use crate::frequency::analyzer::WordCounts;
use crate::topics::model::Topic;

const BAR_WIDTH: usize = 30;
const EXCERPT_CHARS: usize = 160;

/// Display a ranked word list with proportional bars.
pub fn display_top_words(title: &str, counts: &WordCounts) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();

    if counts.is_empty() {
        println!("  {}", "No words to show.".dimmed());
        return;
    }

    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let width = counts
        .iter()
        .map(|(w, _)| w.chars().count())
        .max()
        .unwrap_or(0);

    for (i, (word, count)) in counts.iter().enumerate() {
        let bar_len = (count * BAR_WIDTH).div_ceil(max);
        println!(
            "  {:>3}. {:<width$}  {:>6}  {}",
            i + 1,
            word,
            count,
            "#".repeat(bar_len).cyan(),
        );
    }
}

/// Display top words per date bucket, in chronological order.
pub fn display_timeline(period: Period, buckets: &BTreeMap<DateBucketKey, WordCounts>) {
    println!(
        "\n{}",
        format!("=== Word Timeline ({period}, {} buckets) ===", buckets.len()).bold()
    );

    if buckets.is_empty() {
        println!();
        println!("  {}", "No dates found in the documents.".dimmed());
        return;
    }

    for (bucket, counts) in buckets {
        println!();
        println!("  {}", bucket.to_string().yellow().bold());
        let words: Vec<String> = counts
            .iter()
            .map(|(word, count)| format!("{word} {}", format!("({count})").dimmed()))
            .collect();
        println!("    {}", words.join(", "));
    }
}

/// Display discovered topics, numbered from 1.
pub fn display_topics(topics: &[Topic]) {
    println!(
        "\n{}",
        format!("=== Topics ({}) ===", topics.len()).bold()
    );

    for topic in topics {
        println!();
        println!(
            "  {} {}",
            format!("Topic {}:", topic.index + 1).green().bold(),
            topic.top_terms.join(", ")
        );
        for sentence in &topic.excerpt {
            let preview = super::truncate_chars(sentence, EXCERPT_CHARS);
            println!("    {} {}", ">".dimmed(), preview.dimmed());
        }
    }
}

/// Display documents grouped by cluster.
pub fn display_clusters(clusters: &ClusterAssignments) {
    println!(
        "\n{}",
        format!(
            "=== Clusters ({} documents, {} clusters) ===",
            clusters.len(),
            clusters.num_clusters
        )
        .bold()
    );

    for label in 0..clusters.num_clusters {
        let members = clusters.members(label);
        println!();
        println!(
            "  {} {}",
            format!("Cluster {label}").magenta().bold(),
            format!("({} documents)", members.len()).dimmed()
        );
        for identifier in members {
            println!("    - {identifier}");
        }
    }
}

/// Display the stopword languages available for normalization.
pub fn display_languages(languages: &[&str]) {
    println!("\n{}", "=== Stopword Languages ===".bold());
    println!();
    for language in languages {
        println!("  {language}");
    }
}
