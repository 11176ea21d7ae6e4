#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sequential certificate-processing pipeline.
//!
//! Pages are processed strictly in order, one at a time. A page that
//! fails — unparseable bytes, no name-label phrase, unusable name — is
//! recorded in the report and processing continues; that is the only
//! failure-isolation guarantee the system makes. There are no retries
//! and no state shared across pages except the grouper's in-batch
//! duplicate map.

use certikeeper_cert_models::DetectionOutcome;
use certikeeper_extract::ExtractOptions;
use certikeeper_group::GroupedEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One page queued for processing: the certificate bytes plus where they
/// came from, for reporting.
#[derive(Debug, Clone)]
pub struct PageInput {
    /// Name of the uploaded file this page was split from.
    pub source_name: String,
    /// 1-based page number within that file.
    pub page_number: u32,
    /// Single-page PDF content.
    pub bytes: Vec<u8>,
}

/// Why a page was excluded from the renamed-output set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// The bytes could not be read as a PDF.
    #[error("unparseable PDF: {0}")]
    UnparseablePdf(String),
    /// No name-label phrase matched anywhere in the text.
    #[error("no name found")]
    NoNameFound,
    /// A name was found but fewer than 2 usable tokens remained.
    #[error("invalid name")]
    InvalidName,
}

/// A page excluded from the output, with its identity preserved for the
/// batch report.
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    /// Name of the uploaded file the page came from.
    pub source_name: String,
    /// 1-based page number within that file; 0 when the whole file
    /// failed to read or split, before any page existed.
    pub page_number: u32,
    /// Why the page was excluded.
    #[serde(flatten)]
    pub reason: FailureReason,
}

/// The outcome of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Total pages fed into the pipeline.
    pub pages_processed: usize,
    /// Grouped output pages, in first-appearance order.
    pub entries: Vec<GroupedEntry>,
    /// Pages excluded from the output, in processing order.
    pub failures: Vec<PageFailure>,
}

impl BatchReport {
    /// Number of pages placed at their primary destination.
    #[must_use]
    pub fn renamed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.duplicate).count()
    }

    /// Number of pages rerouted to the duplicates subtree.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.entries.iter().filter(|e| e.duplicate).count()
    }
}

/// Runs extraction over every page in order, then groups the successes.
#[must_use]
pub fn process_batch(pages: Vec<PageInput>, options: &ExtractOptions) -> BatchReport {
    let started_at = Utc::now();
    let pages_processed = pages.len();

    let mut records = Vec::new();
    let mut failures = Vec::new();

    for page in pages {
        match certikeeper_extract::extract(&page.bytes, options) {
            Err(e) => {
                log::error!(
                    "{} page {}: {e}, skipping",
                    page.source_name,
                    page.page_number
                );
                failures.push(PageFailure {
                    source_name: page.source_name,
                    page_number: page.page_number,
                    reason: FailureReason::UnparseablePdf(e.to_string()),
                });
            }
            Ok(result) => match &result.outcome {
                DetectionOutcome::Named { filename, .. } => {
                    log::info!(
                        "{} page {} -> {filename}",
                        page.source_name,
                        page.page_number
                    );
                    records.push((result, page.bytes, page.source_name));
                }
                DetectionOutcome::NoNameFound => {
                    log::warn!("{} page {}: no name found", page.source_name, page.page_number);
                    failures.push(PageFailure {
                        source_name: page.source_name,
                        page_number: page.page_number,
                        reason: FailureReason::NoNameFound,
                    });
                }
                DetectionOutcome::InvalidName => {
                    log::warn!("{} page {}: invalid name", page.source_name, page.page_number);
                    failures.push(PageFailure {
                        source_name: page.source_name,
                        page_number: page.page_number,
                        reason: FailureReason::InvalidName,
                    });
                }
            },
        }
    }

    let entries = certikeeper_group::group(records);

    BatchReport {
        started_at,
        pages_processed,
        entries,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal single-page certificate PDF with the given text line.
    fn certificate_page(text: &str) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{Document, Object, Stream, dictionary};

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
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
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
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn page(source: &str, number: u32, bytes: Vec<u8>) -> PageInput {
        PageInput {
            source_name: source.to_owned(),
            page_number: number,
            bytes,
        }
    }

    #[test]
    fn failure_reasons_render_for_the_report() {
        assert_eq!(
            FailureReason::UnparseablePdf("bad xref".to_owned()).to_string(),
            "unparseable PDF: bad xref"
        );
        assert_eq!(FailureReason::NoNameFound.to_string(), "no name found");
        assert_eq!(FailureReason::InvalidName.to_string(), "invalid name");
    }

    #[test]
    fn one_bad_page_does_not_abort_the_batch() {
        let good = certificate_page(
            "CALI AGENTE DE RAMPA NOMBRE DEL ALUMNO: JUAN CARLOS PEREZ GOMEZ",
        );
        let report = process_batch(
            vec![
                page("roto.pdf", 1, b"not a pdf".to_vec()),
                page("bueno.pdf", 1, good),
            ],
            &ExtractOptions::default(),
        );

        assert_eq!(report.pages_processed, 2);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].reason,
            FailureReason::UnparseablePdf(_)
        ));
        assert_eq!(report.failures[0].source_name, "roto.pdf");
    }

    #[test]
    fn pages_without_names_are_reported_not_renamed() {
        let nameless = certificate_page("CERTIFICADO DE ASISTENCIA BOGOTA");
        let report = process_batch(
            vec![page("anon.pdf", 1, nameless)],
            &ExtractOptions::default(),
        );

        assert!(report.entries.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, FailureReason::NoNameFound);
    }

    #[test]
    fn repeated_certificates_are_rerouted() {
        let text = "CALI AGENTE DE RAMPA NOMBRE DEL ALUMNO: JUAN CARLOS PEREZ GOMEZ";
        let report = process_batch(
            vec![
                page("a.pdf", 1, certificate_page(text)),
                page("b.pdf", 1, certificate_page(text)),
            ],
            &ExtractOptions::default(),
        );

        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.duplicate_count(), 1);
        assert!(report.entries[1].destination.starts_with("REPETIDOS/"));
    }
}
