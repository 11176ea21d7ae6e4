//! Multi-page PDF splitting.
//!
//! Uploads often contain one certificate per page in a single combined
//! PDF. Each page is rewritten as a standalone single-page document so
//! the rest of the pipeline only ever sees one certificate at a time.

use lopdf::Document;

use crate::PdfError;

/// Splits a PDF into one serialized single-page document per source page,
/// in page order.
///
/// A single-page input is passed through byte-identical. A document with
/// no page tree entries yields an empty vector.
///
/// # Errors
///
/// Returns [`PdfError::Structure`] if the bytes cannot be loaded as a PDF
/// document, and [`PdfError::Io`] if a rewritten page fails to serialize.
pub fn split_pages(bytes: &[u8]) -> Result<Vec<Vec<u8>>, PdfError> {
    let doc = Document::load_mem(bytes)?;
    let page_count = u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX);

    if page_count == 0 {
        log::warn!("document has no pages");
        return Ok(Vec::new());
    }
    if page_count == 1 {
        return Ok(vec![bytes.to_vec()]);
    }

    log::debug!("splitting document into {page_count} pages");

    let mut pages = Vec::with_capacity(page_count as usize);

    for page_no in 1..=page_count {
        let mut single = doc.clone();
        let others: Vec<u32> = (1..=page_count).filter(|&n| n != page_no).collect();
        single.delete_pages(&others);
        single.prune_objects();
        single.renumber_objects();
        single.compress();

        let mut buf = Vec::new();
        single.save_to(&mut buf)?;
        pages.push(buf);
    }

    Ok(pages)
}

/// Builds an in-memory PDF with one page of Helvetica text per entry.
/// Test fixture only; mirrors the structure of the generated certificates.
#[cfg(test)]
#[must_use]
pub fn sample_pdf(page_texts: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encodable content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).expect("small page count");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serializable document");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_multi_page_document_in_order() {
        let bytes = sample_pdf(&["PAGINA UNO", "PAGINA DOS", "PAGINA TRES"]);
        let pages = split_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 3);

        for (i, marker) in ["PAGINA UNO", "PAGINA DOS", "PAGINA TRES"]
            .iter()
            .enumerate()
        {
            let doc = Document::load_mem(&pages[i]).unwrap();
            assert_eq!(doc.get_pages().len(), 1);
            let text = crate::page_text(&pages[i]).unwrap();
            assert!(text.contains(marker), "page {i}: {text}");
        }
    }

    #[test]
    fn single_page_passes_through_unchanged() {
        let bytes = sample_pdf(&["UNICA PAGINA"]);
        let pages = split_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], bytes);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let err = split_pages(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::Structure(_)));
    }
}
