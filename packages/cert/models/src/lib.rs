#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Certificate domain types shared across the certikeeper pipeline.
//!
//! This crate defines the canonical vocabulary of the system: operating
//! bases, training course labels, trainee roles, grouping categories, and
//! the per-page detection record. Detectors normalize free-form certificate
//! text into these types; everything downstream (filename composition,
//! grouping, reports) consumes them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A geographic operating base, abbreviated to its 3-letter IATA-style code.
///
/// [`BaseCode::Unknown`] is the lenient fallback when no known city name
/// appears in the certificate text; it displays as `XXX`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BaseCode {
    /// San Andrés
    Adz,
    /// Barranquilla
    Baq,
    /// Bogotá
    Bog,
    /// Cali
    Clo,
    /// Cartagena
    Ctg,
    /// Medellín
    Mde,
    /// Pereira
    Pei,
    /// Santa Marta
    Smr,
    /// No known city name found in the text
    #[serde(rename = "XXX")]
    #[strum(serialize = "XXX")]
    Unknown,
}

impl BaseCode {
    /// Returns `true` when the base could not be detected.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Canonical display label of a completed training course.
///
/// [`CourseLabel::Generic`] is the lenient fallback when no course keyword
/// matches; it displays as `CURSO`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum CourseLabel {
    /// Dangerous goods handling
    #[serde(rename = "MERCANCIAS PELIGROSAS")]
    #[strum(serialize = "MERCANCIAS PELIGROSAS")]
    MercanciasPeligrosas,
    /// Human factors
    #[serde(rename = "FACTORES HUMANOS")]
    #[strum(serialize = "FACTORES HUMANOS")]
    FactoresHumanos,
    /// Safety management system
    #[serde(rename = "SMS")]
    #[strum(serialize = "SMS")]
    Sms,
    /// Ramp safety (role-encoding: always a ramp course)
    #[serde(rename = "SEGURIDAD EN RAMPA")]
    #[strum(serialize = "SEGURIDAD EN RAMPA")]
    SeguridadRampa,
    /// Ramp vehicle operation (role-encoding: always a ramp course)
    #[serde(rename = "CONDUCCION EN RAMPA")]
    #[strum(serialize = "CONDUCCION EN RAMPA")]
    ConduccionRampa,
    /// Passenger service
    #[serde(rename = "SERVICIO AL PASAJERO")]
    #[strum(serialize = "SERVICIO AL PASAJERO")]
    ServicioPasajero,
    /// Instructor training
    #[serde(rename = "FORMACION DE INSTRUCTORES")]
    #[strum(serialize = "FORMACION DE INSTRUCTORES")]
    FormacionInstructores,
    /// No course keyword found in the text
    #[serde(rename = "CURSO")]
    #[strum(serialize = "CURSO")]
    Generic,
}

impl CourseLabel {
    /// Returns `true` for the two ramp security courses whose label already
    /// encodes the trainee's role. Filenames for these courses omit the
    /// role segment.
    #[must_use]
    pub const fn encodes_role(self) -> bool {
        matches!(self, Self::SeguridadRampa | Self::ConduccionRampa)
    }

    /// Returns `true` for the instructor-training course, grouped under its
    /// own category regardless of the detected role.
    #[must_use]
    pub const fn is_instructor(self) -> bool {
        matches!(self, Self::FormacionInstructores)
    }
}

/// The trainee's job category: ground operations (OT) or passenger
/// service (SAP).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RoleCode {
    /// Operaciones terrestres (ground operations)
    Ot,
    /// Servicio al pasajero (passenger service)
    Sap,
}

/// Output folder category under a base directory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Category {
    /// Ground operations certificates
    Rampa,
    /// Passenger service certificates
    Pax,
    /// Instructor training certificates
    Instructores,
    /// Anything that fits no other category
    Otros,
}

/// A student's name reduced to first given name and first surname.
///
/// Both tokens are non-empty, alphabetic, and upper-case by construction
/// (the name splitter only ever emits cleaned tokens).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentName {
    /// First given name (middle names dropped)
    pub first_name: String,
    /// First surname (second surnames dropped)
    pub surname: String,
}

impl std::fmt::Display for StudentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.surname)
    }
}

/// Outcome of the name extraction for one page.
///
/// The canonical filename only exists when a name was found and split
/// successfully, so it lives inside the [`DetectionOutcome::Named`]
/// variant rather than as a separate optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionOutcome {
    /// A name was detected and split; the page can be renamed.
    Named {
        /// The extracted student name
        name: StudentName,
        /// The canonical output filename for this page
        filename: String,
    },
    /// No name-label phrase matched anywhere in the text.
    NoNameFound,
    /// A name string was found but fewer than 2 usable tokens remained
    /// after cleanup.
    InvalidName,
}

impl DetectionOutcome {
    /// Returns `true` when a name was detected and a filename assigned.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. })
    }
}

/// The structured result of running all detectors over one page.
///
/// Base, course, and role always carry a value: unmatched input degrades
/// to sentinels (`XXX`, `CURSO`, default SAP) rather than failing. Only
/// the name field is strict; its failures are captured in `outcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected operating base
    pub base: BaseCode,
    /// Detected course label
    pub course: CourseLabel,
    /// Detected role; `None` for role-encoding course labels
    pub role: Option<RoleCode>,
    /// Name extraction outcome, including the canonical filename on success
    #[serde(flatten)]
    pub outcome: DetectionOutcome,
}

impl DetectionResult {
    /// The extracted student name, if any.
    #[must_use]
    pub const fn name(&self) -> Option<&StudentName> {
        match &self.outcome {
            DetectionOutcome::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The canonical filename, present iff the outcome is [`DetectionOutcome::Named`].
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match &self.outcome {
            DetectionOutcome::Named { filename, .. } => Some(filename),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_base_displays_sentinel() {
        assert_eq!(BaseCode::Unknown.to_string(), "XXX");
        assert_eq!(BaseCode::Clo.to_string(), "CLO");
    }

    #[test]
    fn generic_course_displays_sentinel() {
        assert_eq!(CourseLabel::Generic.to_string(), "CURSO");
        assert_eq!(
            CourseLabel::MercanciasPeligrosas.to_string(),
            "MERCANCIAS PELIGROSAS"
        );
    }

    #[test]
    fn ramp_courses_encode_role() {
        assert!(CourseLabel::SeguridadRampa.encodes_role());
        assert!(CourseLabel::ConduccionRampa.encodes_role());
        assert!(!CourseLabel::FactoresHumanos.encodes_role());
        assert!(!CourseLabel::Generic.encodes_role());
    }

    #[test]
    fn filename_present_iff_named() {
        let named = DetectionResult {
            base: BaseCode::Clo,
            course: CourseLabel::Generic,
            role: Some(RoleCode::Ot),
            outcome: DetectionOutcome::Named {
                name: StudentName {
                    first_name: "JUAN".to_owned(),
                    surname: "PEREZ".to_owned(),
                },
                filename: "CLO CURSO OT JUAN PEREZ.PDF".to_owned(),
            },
        };
        assert_eq!(named.filename(), Some("CLO CURSO OT JUAN PEREZ.PDF"));
        assert_eq!(named.name().unwrap().to_string(), "JUAN PEREZ");

        let failed = DetectionResult {
            outcome: DetectionOutcome::NoNameFound,
            ..named
        };
        assert_eq!(failed.filename(), None);
        assert!(failed.name().is_none());
    }

    #[test]
    fn base_parses_from_code_string() {
        use std::str::FromStr as _;
        assert_eq!(BaseCode::from_str("BOG").unwrap(), BaseCode::Bog);
        assert_eq!(BaseCode::from_str("XXX").unwrap(), BaseCode::Unknown);
    }
}
