// CSV export of loaded documents, one row per document.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::document::Document;

/// Write `filename,text` rows (with header) for every document.
pub fn export_csv<W: Write>(documents: &[Document], writer: W) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["filename", "text"])?;
    for doc in documents {
        csv.write_record([doc.identifier.as_str(), doc.text.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Export to a file at `path`, overwriting it.
pub fn export_csv_file(documents: &[Document], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    export_csv(documents, file)?;
    info!(path = %path.display(), rows = documents.len(), "Exported documents to CSV");
    Ok(())
}
