//! PDF Text Extractor — turns uploaded resume bytes into plain text.
//!
//! Pages are concatenated in document order. Exact layout fidelity is not
//! required; the text only needs to be good enough for prompt construction.

use crate::errors::AppError;

/// Extracts the textual content of a PDF resume.
///
/// A PDF that parses but contains no machine-readable text (e.g. a scanned
/// image without a text layer) is an extraction failure: the rest of the
/// pipeline cannot operate on an empty resume.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::DocumentParse(format!("could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::DocumentParse(
            "no machine-readable text found in PDF".to_string(),
        ));
    }

    Ok(text)
}
