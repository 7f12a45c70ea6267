//! Best-effort PDF text extraction, a thin wrapper over the `pdf-extract`
//! crate. Extraction is lossy and makes no layout guarantees; failure is not
//! an error at this layer. Callers treat whitespace-only output as an
//! unreadable document.

/// Extracts the concatenated text layer of a PDF from an in-memory byte
/// stream. Returns an empty string if the document cannot be parsed or has no
/// extractable text.
pub fn extract_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to extract text from PDF: {e}");
            String::new()
        }
    }
}
