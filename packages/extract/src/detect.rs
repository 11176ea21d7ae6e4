//! Field detectors over normalized certificate text.
//!
//! Each detector is pure, deterministic, and independent of the others.
//! Base, course, and role degrade leniently to sentinel values when
//! nothing matches; only the name detector reports "not found", which the
//! record builder treats as a hard per-page failure.

use std::sync::LazyLock;

use certikeeper_cert_models::{BaseCode, CourseLabel, RoleCode};
use regex::Regex;

use crate::tables::{BASE_CITIES, COURSE_KEYS, OT_KEYWORDS, SAP_KEYWORDS};

/// Name-label patterns, most specific first. Each requires a label phrase
/// followed by a run of at least 5 uppercase letters and spaces.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"NOMBRE\s+DEL\s+ALUMNO\s*:?\s*([A-ZÑ][A-ZÑ ]{4,})",
        r"NOMBRE\s+DEL\s+PARTICIPANTE\s*:?\s*([A-ZÑ][A-ZÑ ]{4,})",
        r"(?:SE\s+)?CERTIFICA\s+QUE\s*:?\s*([A-ZÑ][A-ZÑ ]{4,})",
        r"OTORGADO\s+A\s*:?\s*([A-ZÑ][A-ZÑ ]{4,})",
        r"ALUMNO\s*:?\s*([A-ZÑ][A-ZÑ ]{4,})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Detects the operating base from the first known city-name substring,
/// in [`BASE_CITIES`] order. No match degrades to [`BaseCode::Unknown`].
#[must_use]
pub fn detect_base(text: &str) -> BaseCode {
    for (city, code) in BASE_CITIES {
        if text.contains(city) {
            return *code;
        }
    }
    BaseCode::Unknown
}

/// Detects the course label, scanning line by line and checking
/// [`COURSE_KEYS`] in order within each line. No match degrades to
/// [`CourseLabel::Generic`].
#[must_use]
pub fn detect_course(text: &str) -> CourseLabel {
    for line in text.lines() {
        for (key, label) in COURSE_KEYS {
            if line.contains(key) {
                return *label;
            }
        }
    }
    CourseLabel::Generic
}

/// Classifies the trainee's role. OT keywords are checked before SAP
/// keywords; when neither list matches the role defaults to SAP, the
/// statistically more common ambiguous case. The default is a business
/// rule, not an error.
#[must_use]
pub fn detect_role(text: &str) -> RoleCode {
    for keyword in OT_KEYWORDS {
        if text.contains(keyword) {
            return RoleCode::Ot;
        }
    }
    for keyword in SAP_KEYWORDS {
        if text.contains(keyword) {
            return RoleCode::Sap;
        }
    }
    RoleCode::Sap
}

/// Detects the raw full-name string after a name-label phrase.
///
/// Patterns are tried most specific first; within a pattern, every match
/// in the text is considered. The first captured run that splits into at
/// least two whitespace-separated tokens wins. Later patterns only run
/// when earlier ones produced no acceptable candidate.
#[must_use]
pub fn detect_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let candidate = caps[1].trim();
            if candidate.split_whitespace().count() >= 2 {
                log::debug!("name candidate: {candidate}");
                return Some(candidate.to_owned());
            }
        }
    }
    None
}
