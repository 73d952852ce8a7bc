// PDF text extraction.

use anyhow::Result;

/// Extract the plain text of a PDF held in memory, trimmed.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("PDF extraction failed: {e}"))?;
    Ok(text.trim().to_string())
}
