#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic field extraction for certificate pages.
//!
//! One certificate page goes in as raw PDF bytes; a [`DetectionResult`]
//! comes out: operating base, course label, role, the student's name
//! reduced to first name + first surname, and the canonical output
//! filename. The pipeline is a fixed set of ordered substring and regex
//! heuristics tuned to one family of certificate templates — deliberately
//! not a general name parser.
//!
//! Base, course, and role fall back to sentinel values when nothing
//! matches. Only the name is strict: a page without a usable name is a
//! per-page failure, captured in [`DetectionOutcome`].

pub mod detect;
pub mod name_split;
pub mod tables;

use certikeeper_cert_models::{
    BaseCode, CourseLabel, DetectionOutcome, DetectionResult, RoleCode, StudentName,
};
use certikeeper_pdf::PdfError;

pub use detect::{detect_base, detect_course, detect_name, detect_role};
pub use name_split::{NameSplitPolicy, split_name};

/// Errors fatal to the extraction of a single page.
///
/// Detection failures (no name, unusable name) are not errors; they are
/// recorded in the [`DetectionOutcome`] so the caller can report them
/// without aborting the batch.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The page bytes could not be read as a PDF.
    #[error(transparent)]
    UnparseablePdf(#[from] PdfError),
}

/// Per-call extraction configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Which name-splitting rule to apply (template families diverge).
    pub name_split: NameSplitPolicy,
}

/// Extracts a structured record from the raw bytes of one certificate page.
///
/// # Errors
///
/// Returns [`ExtractError::UnparseablePdf`] if the bytes are not a
/// parseable PDF. All other failure modes are per-page outcomes inside
/// the returned [`DetectionResult`].
pub fn extract(page: &[u8], options: &ExtractOptions) -> Result<DetectionResult, ExtractError> {
    let text = certikeeper_pdf::page_text(page)?;
    Ok(extract_from_text(&text, options))
}

/// Runs all detectors over already-normalized text.
///
/// Pure and deterministic: identical text always yields an identical
/// record, including the filename.
#[must_use]
pub fn extract_from_text(text: &str, options: &ExtractOptions) -> DetectionResult {
    let base = detect_base(text);
    let course = detect_course(text);

    // Role-encoding courses carry no separate role segment.
    let role = if course.encodes_role() {
        None
    } else {
        Some(detect_role(text))
    };

    let outcome = match detect_name(text) {
        None => {
            log::debug!("no name-label phrase matched");
            DetectionOutcome::NoNameFound
        }
        Some(raw) => match split_name(&raw, options.name_split) {
            None => {
                log::debug!("name {raw:?} left fewer than 2 usable tokens");
                DetectionOutcome::InvalidName
            }
            Some(name) => {
                let filename = canonical_filename(base, course, role, &name);
                DetectionOutcome::Named { name, filename }
            }
        },
    };

    DetectionResult {
        base,
        course,
        role,
        outcome,
    }
}

/// Composes the canonical output filename:
/// `"<BASE3> <COURSE_LABEL> [<ROLE>] <FIRST> <SURNAME>.pdf"`, single-space
/// separated and upper-cased in full (so the extension reads `.PDF`).
/// The role segment is omitted when the course label already encodes it.
#[must_use]
pub fn canonical_filename(
    base: BaseCode,
    course: CourseLabel,
    role: Option<RoleCode>,
    name: &StudentName,
) -> String {
    let mut parts = vec![base.to_string(), course.to_string()];
    if let Some(role) = role {
        parts.push(role.to_string());
    }
    parts.push(name.first_name.clone());
    parts.push(name.surname.clone());

    format!("{}.pdf", parts.join(" ")).to_uppercase()
}
