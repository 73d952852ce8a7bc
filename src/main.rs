use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use docscope::clustering::documents::cluster;
use docscope::config::Config;
use docscope::dates::period::Period;
use docscope::frequency::analyzer::{document_top_words, top_words, top_words_by_period};
use docscope::ingest::loader::load_documents;
use docscope::output::{csv, terminal};
use docscope::text::resources::LinguisticResources;
use docscope::topics::model::{model_topics, model_topics_with_excerpts};

/// Docscope: text analytics for collections of PDF documents.
///
/// Counts words, tracks vocabulary over time, discovers topics and
/// clusters similar documents.
#[derive(Parser)]
#[command(name = "docscope", version, about)]
struct Cli {
    /// Stopword language for word counts (overrides DOCSCOPE_LANGUAGE)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Print results as JSON instead of colored tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Most frequent words across all documents
    Words {
        /// PDF, .txt or .md files to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// How many words to show (overrides DOCSCOPE_TOP_N)
        #[arg(long)]
        top_n: Option<usize>,

        /// Also show the top words of each document
        #[arg(long)]
        per_document: bool,
    },

    /// Most frequent words per time period, keyed on dates found in the text
    Timeline {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long)]
        top_n: Option<usize>,

        /// yearly, quarterly, half-yearly, 3-years or 5-years
        #[arg(long)]
        period: Option<String>,
    },

    /// Discover topics with NMF over TF-IDF
    Topics {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Number of topics (overrides DOCSCOPE_NUM_TOPICS)
        #[arg(long)]
        num_topics: Option<usize>,

        /// Show up to two example sentences per topic
        #[arg(long)]
        excerpts: bool,
    },

    /// Group similar documents with k-means
    Clusters {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Number of clusters (overrides DOCSCOPE_NUM_CLUSTERS)
        #[arg(long)]
        num_clusters: Option<usize>,
    },

    /// Export extracted text to CSV (filename,text)
    Export {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output file (default: documents.csv)
        #[arg(long, short, default_value = "documents.csv")]
        output: PathBuf,
    },

    /// List the languages with bundled stopword lists
    Languages,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docscope=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(language) = &cli.language {
        config.language = language.trim().to_lowercase();
    }

    let resources = LinguisticResources::load();
    if !resources.supports(&config.language) {
        eprintln!(
            "{}",
            format!(
                "No stopword list for '{}'; falling back to English. Run `docscope languages` to see options.",
                config.language
            )
            .yellow()
        );
    }

    match cli.command {
        Commands::Words {
            paths,
            top_n,
            per_document,
        } => {
            if let Some(n) = top_n {
                config.top_n = n;
            }
            config.require_top_n()?;
            let documents = load_documents(&paths, &config.strip)?;

            let (counts, _table) =
                top_words(&documents, config.top_n, &config.language, &resources)?;

            let mut per_doc = Vec::new();
            if per_document {
                for doc in &documents {
                    // A document with no countable words shows an empty list
                    let doc_counts =
                        document_top_words(doc, config.top_n, &config.language, &resources)
                            .unwrap_or_default();
                    per_doc.push((doc.identifier.clone(), doc_counts));
                }
            }

            if cli.json {
                #[derive(Serialize)]
                struct WordsReport<'a> {
                    top_words: &'a [(String, usize)],
                    documents: &'a [(String, Vec<(String, usize)>)],
                }
                print_json(&WordsReport {
                    top_words: &counts,
                    documents: &per_doc,
                })?;
            } else {
                terminal::display_top_words(
                    &format!("Top {} words ({} documents)", config.top_n, documents.len()),
                    &counts,
                );
                for (identifier, doc_counts) in &per_doc {
                    terminal::display_top_words(identifier, doc_counts);
                }
            }
        }

        Commands::Timeline {
            paths,
            top_n,
            period,
        } => {
            if let Some(n) = top_n {
                config.top_n = n;
            }
            if let Some(label) = period {
                config.period = Period::from_label(&label);
            }
            config.require_top_n()?;
            let documents = load_documents(&paths, &config.strip)?;

            let buckets = top_words_by_period(
                &documents,
                config.top_n,
                &config.language,
                config.period,
                &resources,
            )?;

            if cli.json {
                print_json(&buckets)?;
            } else {
                terminal::display_timeline(config.period, &buckets);
            }
        }

        Commands::Topics {
            paths,
            num_topics,
            excerpts,
        } => {
            if let Some(k) = num_topics {
                config.num_topics = k;
            }
            config.require_topics()?;
            let documents = load_documents(&paths, &config.strip)?;

            let topics = if excerpts {
                model_topics_with_excerpts(&documents, config.num_topics, &resources)?
            } else {
                model_topics(&documents, config.num_topics, &resources)?
            };

            if cli.json {
                print_json(&topics)?;
            } else {
                terminal::display_topics(&topics);
            }
        }

        Commands::Clusters {
            paths,
            num_clusters,
        } => {
            if let Some(k) = num_clusters {
                config.num_clusters = k;
            }
            config.require_clusters()?;
            let documents = load_documents(&paths, &config.strip)?;

            let clusters = cluster(&documents, config.num_clusters, &resources)?;

            if cli.json {
                print_json(&clusters)?;
            } else {
                terminal::display_clusters(&clusters);
            }
        }

        Commands::Export { paths, output } => {
            let documents = load_documents(&paths, &config.strip)?;
            csv::export_csv_file(&documents, &output)?;
            println!(
                "Exported {} documents to {}",
                documents.len(),
                output.display()
            );
        }

        Commands::Languages => {
            let languages = resources.languages();
            if cli.json {
                print_json(&languages)?;
            } else {
                terminal::display_languages(&languages);
            }
        }
    }

    info!("Done");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
