#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF text-layer normalization and page splitting.
//!
//! Certificates arrive as single- or multi-page PDFs. This crate provides
//! the two I/O-adjacent primitives the extraction pipeline needs:
//!
//! - [`split_pages`]: one serialized single-page document per source page,
//!   via pure-Rust [`lopdf`]
//! - [`page_text`]: the concatenated text-layer content of one page,
//!   upper-cased and accent-folded, via [`pdf_extract`]
//!
//! Everything downstream operates on the normalized text only; layout,
//! fonts, and images never leave this crate.

pub mod split;

pub use split::split_pages;

/// Errors from PDF parsing and page manipulation.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The bytes could not be parsed as a PDF by the text extractor.
    #[error("unparseable PDF: {0}")]
    Unparseable(String),

    /// The document structure could not be loaded or rewritten.
    #[error("PDF structure error: {0}")]
    Structure(#[from] lopdf::Error),

    /// An I/O operation failed while serializing a page.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the normalized text layer of a single-page PDF.
///
/// The result is the concatenation of all text-layer content, upper-cased
/// and with Spanish accents folded (see [`normalize_text`]). A page with
/// no text layer yields an empty string, not an error; downstream
/// detectors then simply find no matches.
///
/// # Errors
///
/// Returns [`PdfError::Unparseable`] if the bytes are not a parseable PDF.
pub fn page_text(bytes: &[u8]) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Unparseable(e.to_string()))?;

    log::debug!("extracted {} characters of text", text.len());

    Ok(normalize_text(&text))
}

/// Normalizes raw text-layer content for detection.
///
/// Upper-cases the input and folds accented vowels (Á É Í Ó Ú Ü) to their
/// base letters so the fixed lookup tables can stay unaccented. Ñ is a
/// distinct letter in Spanish and is preserved.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' => 'A',
            'É' | 'È' => 'E',
            'Í' | 'Ì' => 'I',
            'Ó' | 'Ò' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_folds_accents() {
        assert_eq!(
            normalize_text("Certificado de Conducción en Rampa, Bogotá"),
            "CERTIFICADO DE CONDUCCION EN RAMPA, BOGOTA"
        );
    }

    #[test]
    fn preserves_enye() {
        assert_eq!(normalize_text("Peña Muñoz"), "PEÑA MUÑOZ");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn garbage_bytes_are_unparseable() {
        let err = page_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Unparseable(_)));
    }

    #[test]
    fn extracts_normalized_text_from_generated_page() {
        let bytes = split::sample_pdf(&["Certificado de Juan Perez"]);
        let text = page_text(&bytes).unwrap();
        assert!(text.contains("CERTIFICADO DE JUAN PEREZ"), "got: {text}");
    }
}
