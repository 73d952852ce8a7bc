use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::dates::period::Period;
use crate::ingest::clean::StripOptions;
use crate::text::resources::FALLBACK_LANGUAGE;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Stopword language for the frequency analyses (DOCSCOPE_LANGUAGE)
    pub language: String,
    /// How many words the frequency views show (DOCSCOPE_TOP_N)
    pub top_n: usize,
    /// Bucketing granularity for the timeline (DOCSCOPE_PERIOD)
    pub period: Period,
    pub num_topics: usize,
    pub num_clusters: usize,
    /// Header/footer stripping applied to extracted PDF text
    pub strip: StripOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: FALLBACK_LANGUAGE.to_string(),
            top_n: 10,
            period: Period::Yearly,
            num_topics: 3,
            num_clusters: 3,
            strip: StripOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take their
    /// defaults; set keys that fail to parse are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let strip_defaults = StripOptions::default();

        Ok(Self {
            language: lookup("DOCSCOPE_LANGUAGE")
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .unwrap_or(defaults.language),
            top_n: parse_var(&lookup, "DOCSCOPE_TOP_N")?.unwrap_or(defaults.top_n),
            // Unknown labels fall back to yearly with a warning
            period: lookup("DOCSCOPE_PERIOD")
                .map(|p| Period::from_label(&p))
                .unwrap_or(defaults.period),
            num_topics: parse_var(&lookup, "DOCSCOPE_NUM_TOPICS")?.unwrap_or(defaults.num_topics),
            num_clusters: parse_var(&lookup, "DOCSCOPE_NUM_CLUSTERS")?
                .unwrap_or(defaults.num_clusters),
            strip: StripOptions {
                repeat_threshold: parse_var(&lookup, "DOCSCOPE_HEADER_THRESHOLD")?
                    .unwrap_or(strip_defaults.repeat_threshold),
                min_words: parse_var(&lookup, "DOCSCOPE_MIN_LINE_WORDS")?
                    .unwrap_or(strip_defaults.min_words),
            },
        })
    }

    /// Check that the frequency views have something to show.
    pub fn require_top_n(&self) -> Result<()> {
        if self.top_n == 0 {
            anyhow::bail!("top-n must be at least 1 (set DOCSCOPE_TOP_N or pass --top-n)");
        }
        Ok(())
    }

    /// Topic discovery needs at least two topics to be meaningful.
    pub fn require_topics(&self) -> Result<()> {
        if self.num_topics < 2 {
            anyhow::bail!(
                "Number of topics must be at least 2, got {}.\n\
                 Set DOCSCOPE_NUM_TOPICS or pass --num-topics.",
                self.num_topics
            );
        }
        Ok(())
    }

    /// Clustering needs at least two clusters to be meaningful.
    pub fn require_clusters(&self) -> Result<()> {
        if self.num_clusters < 2 {
            anyhow::bail!(
                "Number of clusters must be at least 2, got {}.\n\
                 Set DOCSCOPE_NUM_CLUSTERS or pass --num-clusters.",
                self.num_clusters
            );
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
    }
}
