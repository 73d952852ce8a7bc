// Load files from disk into documents.
//
// PDFs are extracted and stripped of headers/footers; plain-text files are
// read as-is. When loading a batch, a file that fails is reported and
// skipped so one broken upload does not sink the whole analysis.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::document::Document;

use super::clean::{remove_headers_footers, StripOptions};
use super::pdf::extract_pdf_text;

/// Load one file. The identifier is the file name.
pub fn load_document(path: &Path, options: &StripOptions) -> Result<Document> {
    let identifier = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let raw = extract_pdf_text(&bytes)
                .with_context(|| format!("Failed to extract text from {}", path.display()))?;
            remove_headers_footers(&raw, options)
        }
        "txt" | "md" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported file type '{other}' for {} (expected .pdf, .txt or .md)",
            path.display()
        ),
    };

    Ok(Document::new(identifier, text))
}

/// Load every path in order, skipping (and logging) files that fail.
///
/// Fails only when nothing could be loaded.
pub fn load_documents(paths: &[PathBuf], options: &StripOptions) -> Result<Vec<Document>> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Loading [{bar:30}] {pos}/{len} {msg}")?);

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        pb.set_message(path.display().to_string());
        match load_document(path, options) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load document, skipping");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if documents.is_empty() {
        anyhow::bail!("None of the {} input files could be loaded", paths.len());
    }

    info!(
        loaded = documents.len(),
        skipped = paths.len() - documents.len(),
        "Loaded documents"
    );
    Ok(documents)
}
