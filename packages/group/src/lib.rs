#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch grouping of processed certificate pages.
//!
//! Each successfully named page is assigned a destination path of the
//! form `BASE/CATEGORY/FILENAME`. A single-pass map over a composite
//! (student, category, base) key detects repeats within the batch: the
//! first page seen with a key is primary, later ones are rerouted under
//! the `REPETIDOS/` prefix with the same filename. Which copy is primary
//! depends entirely on batch order; nothing persists across runs.

use std::collections::HashSet;

use certikeeper_cert_models::{BaseCode, Category, DetectionResult, RoleCode};

/// Path prefix for duplicate pages.
pub const DUPLICATES_PREFIX: &str = "REPETIDOS";

/// A page placed into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedEntry {
    /// Destination path relative to the output root, `/`-separated.
    pub destination: String,
    /// The name the page arrived under, kept for reporting.
    pub source_name: String,
    /// The single-page PDF content.
    pub bytes: Vec<u8>,
    /// `true` when an earlier page in the batch already claimed this
    /// (student, category, base) key.
    pub duplicate: bool,
}

/// Derives the output folder category for a record.
///
/// The instructor course wins over any detected role; the ramp security
/// courses group with ground operations. A record with neither a role
/// nor a categorizing course falls through to OTROS.
#[must_use]
pub const fn category(result: &DetectionResult) -> Category {
    if result.course.is_instructor() {
        return Category::Instructores;
    }
    if result.course.encodes_role() {
        return Category::Rampa;
    }
    match result.role {
        Some(RoleCode::Ot) => Category::Rampa,
        Some(RoleCode::Sap) => Category::Pax,
        None => Category::Otros,
    }
}

/// Assigns every named record a destination path, rerouting duplicates.
///
/// Records without a name are skipped (they were already reported as
/// failures upstream). Output order matches input order; the first
/// record with a given composite key keeps its normal category path.
#[must_use]
pub fn group(records: Vec<(DetectionResult, Vec<u8>, String)>) -> Vec<GroupedEntry> {
    let mut seen: HashSet<(String, Category, BaseCode)> = HashSet::new();
    let mut entries = Vec::with_capacity(records.len());

    for (result, bytes, source_name) in records {
        let (Some(name), Some(filename)) = (result.name(), result.filename()) else {
            log::debug!("skipping unnamed page {source_name}");
            continue;
        };

        let category = category(&result);
        let fresh = seen.insert((name.to_string(), category, result.base));

        let destination = if fresh {
            format!("{}/{category}/{filename}", result.base)
        } else {
            log::info!("duplicate certificate for {name} at {}", result.base);
            format!("{DUPLICATES_PREFIX}/{}/{category}/{filename}", result.base)
        };

        entries.push(GroupedEntry {
            destination,
            source_name,
            bytes,
            duplicate: !fresh,
        });
    }

    entries
}
